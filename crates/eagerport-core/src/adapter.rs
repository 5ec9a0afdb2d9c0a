use std::collections::BTreeMap;

/// Keyword example inputs, keyed by parameter name.
pub type KwargInputs<V> = BTreeMap<String, V>;

/// What an eager model definition must expose so an export pipeline can trace it.
///
/// `Module`, `Input` and `DynamicShapes` are opaque to this crate; their
/// concrete form is whatever the consuming tracer expects. Within this
/// workspace the usual choices are [`crate::Tensor`] and
/// [`crate::DynamicShapes`].
///
/// An impl that leaves out either required operation does not compile.
pub trait EagerModel {
    type Module;
    type Input;
    type DynamicShapes;

    /// Instantiated module, ready for export.
    fn get_eager_model(&self) -> Self::Module;

    /// Positional example inputs, in call order.
    fn get_example_inputs(&self) -> Vec<Self::Input>;

    /// Keyword example inputs. None by default.
    fn get_example_kwarg_inputs(&self) -> KwargInputs<Self::Input> {
        KwargInputs::new()
    }

    /// Which input dimensions may vary. None by default.
    fn get_dynamic_shapes(&self) -> Option<Self::DynamicShapes> {
        None
    }
}

impl<T: EagerModel + ?Sized> EagerModel for &T {
    type Module = T::Module;
    type Input = T::Input;
    type DynamicShapes = T::DynamicShapes;

    fn get_eager_model(&self) -> Self::Module {
        (**self).get_eager_model()
    }

    fn get_example_inputs(&self) -> Vec<Self::Input> {
        (**self).get_example_inputs()
    }

    fn get_example_kwarg_inputs(&self) -> KwargInputs<Self::Input> {
        (**self).get_example_kwarg_inputs()
    }

    fn get_dynamic_shapes(&self) -> Option<Self::DynamicShapes> {
        (**self).get_dynamic_shapes()
    }
}
