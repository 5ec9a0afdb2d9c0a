use anyhow::Result;
use tracing::debug;

use crate::{DynamicShapes, EagerModel, KwargInputs, Tensor};

/// Everything an exporter needs from one adapter, gathered in a single pass.
#[derive(Clone, Debug)]
pub struct TraceCall<M, V, D> {
    pub module: M,
    pub args: Vec<V>,
    pub kwargs: KwargInputs<V>,
    pub dynamic_shapes: Option<D>,
}

impl<M, V, D> TraceCall<M, V, D> {
    pub fn collect<A>(adapter: &A) -> Self
    where
        A: EagerModel<Module = M, Input = V, DynamicShapes = D> + ?Sized,
    {
        let module = adapter.get_eager_model();
        let args = adapter.get_example_inputs();
        let kwargs = adapter.get_example_kwarg_inputs();
        let dynamic_shapes = adapter.get_dynamic_shapes();

        debug!(
            module = std::any::type_name::<M>(),
            args = args.len(),
            kwargs = kwargs.len(),
            dynamic = dynamic_shapes.is_some(),
            "collected trace call"
        );

        Self {
            module,
            args,
            kwargs,
            dynamic_shapes,
        }
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    pub fn kwarg_names(&self) -> impl Iterator<Item = &str> {
        self.kwargs.keys().map(String::as_str)
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic_shapes.is_some()
    }
}

impl<M> TraceCall<M, Tensor, DynamicShapes> {
    /// Check the dynamic shapes, if any, against the example tensors.
    pub fn validate(&self, arg_names: &[String]) -> Result<()> {
        match &self.dynamic_shapes {
            Some(shapes) => shapes.validate(&self.args, arg_names, &self.kwargs),
            None => Ok(()),
        }
    }
}
