use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use crate::{DType, Device, Dim, DynamicShapes, EagerModel, Shape, Tensor, TraceCall};

/// Names for positional example inputs, used to address them in
/// [`DynamicShapes`].
pub trait NamedInputs {
    fn arg_names(&self, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("input{i}")).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputSummary {
    pub name: String,
    pub dtype: DType,
    pub shape: Shape,
    pub device: Device,
}

impl InputSummary {
    fn new(name: &str, tensor: &Tensor) -> Self {
        Self {
            name: name.to_string(),
            dtype: tensor.dtype,
            shape: tensor.shape.clone(),
            device: tensor.device.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DynamicSummary {
    pub input: String,
    pub axis: usize,
    pub dim: Dim,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelSummary {
    pub module: &'static str,
    pub args: Vec<InputSummary>,
    pub kwargs: Vec<InputSummary>,
    pub dynamic: Vec<DynamicSummary>,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "module: {}", self.module)?;
        writeln!(f, "args:")?;
        for a in &self.args {
            writeln!(f, "  {}: {} {} ({:?})", a.name, a.dtype, a.shape, a.device)?;
        }
        if !self.kwargs.is_empty() {
            writeln!(f, "kwargs:")?;
            for k in &self.kwargs {
                writeln!(f, "  {}: {} {} ({:?})", k.name, k.dtype, k.shape, k.device)?;
            }
        }
        if self.dynamic.is_empty() {
            writeln!(f, "dynamic shapes: none")
        } else {
            writeln!(f, "dynamic shapes:")?;
            for d in &self.dynamic {
                writeln!(f, "  {}[{}] = {}", d.input, d.axis, d.dim)?;
            }
            Ok(())
        }
    }
}

/// Object-safe view over tensor-valued adapters.
pub trait ExportableModel: Send + Sync {
    fn input_names(&self) -> Vec<String>;
    fn describe(&self) -> Result<ModelSummary>;
}

impl<T> ExportableModel for T
where
    T: EagerModel<Input = Tensor, DynamicShapes = DynamicShapes> + NamedInputs + Send + Sync,
{
    fn input_names(&self) -> Vec<String> {
        NamedInputs::arg_names(self, self.get_example_inputs().len())
    }

    fn describe(&self) -> Result<ModelSummary> {
        let call = TraceCall::collect(self);
        let names = NamedInputs::arg_names(self, call.arg_count());
        call.validate(&names)?;

        let args = names
            .iter()
            .zip(&call.args)
            .map(|(name, t)| InputSummary::new(name, t))
            .collect();
        let kwargs = call
            .kwargs
            .iter()
            .map(|(name, t)| InputSummary::new(name, t))
            .collect();
        let dynamic = call
            .dynamic_shapes
            .iter()
            .flat_map(|shapes| shapes.iter())
            .flat_map(|(input, axes)| {
                axes.iter().map(move |(&axis, dim)| DynamicSummary {
                    input: input.clone(),
                    axis,
                    dim: dim.clone(),
                })
            })
            .collect();

        Ok(ModelSummary {
            module: std::any::type_name::<T::Module>(),
            args,
            kwargs,
            dynamic,
        })
    }
}

#[derive(Default)]
pub struct ModelRegistry {
    models: HashMap<String, Arc<dyn ExportableModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
        }
    }

    pub fn register<M>(&mut self, name: &str, model: M) -> Result<()>
    where
        M: ExportableModel + 'static,
    {
        if self.models.contains_key(name) {
            bail!("model `{name}` is already registered");
        }
        self.models.insert(name.to_string(), Arc::new(model));
        debug!(model = name, "registered model adapter");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ExportableModel>> {
        self.models.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn describe(&self, name: &str) -> Result<ModelSummary> {
        let model = self
            .get(name)
            .with_context(|| format!("unknown model `{name}`"))?;
        let summary = model
            .describe()
            .with_context(|| format!("invalid example inputs for model `{name}`"))?;
        info!(
            model = name,
            args = summary.args.len(),
            kwargs = summary.kwargs.len(),
            dynamic = summary.dynamic.len(),
            "described model"
        );
        Ok(summary)
    }
}
