use std::collections::btree_map;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use anyhow::{bail, ensure, Result};

use crate::{KwargInputs, Tensor};

/// A named dimension that may vary between invocations.
///
/// Dims sharing a name across inputs are the same symbol to the exporter and
/// must agree on bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dim {
    pub name: String,
    pub min: Option<usize>,
    pub max: Option<usize>, // inclusive
}

impl Dim {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min: None,
            max: None,
        }
    }

    pub fn with_min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn contains(&self, size: usize) -> bool {
        self.min.map_or(true, |min| size >= min) && self.max.map_or(true, |max| size <= max)
    }

    fn same_bounds(&self, other: &Dim) -> bool {
        self.min == other.min && self.max == other.max
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (None, None) => write!(f, "{}", self.name),
            (Some(min), None) => write!(f, "{}[{min}..]", self.name),
            (None, Some(max)) => write!(f, "{}[..={max}]", self.name),
            (Some(min), Some(max)) => write!(f, "{}[{min}..={max}]", self.name),
        }
    }
}

/// Per-input map of axis index to [`Dim`]. Inputs are addressed by name:
/// keyword inputs by their key, positional inputs by the names the caller
/// assigns them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DynamicShapes {
    inputs: BTreeMap<String, BTreeMap<usize, Dim>>,
}

impl DynamicShapes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, input: impl Into<String>, axis: usize, dim: Dim) -> Option<Dim> {
        self.inputs.entry(input.into()).or_default().insert(axis, dim)
    }

    pub fn with(mut self, input: impl Into<String>, axis: usize, dim: Dim) -> Self {
        self.insert(input, axis, dim);
        self
    }

    pub fn get(&self, input: &str) -> Option<&BTreeMap<usize, Dim>> {
        self.inputs.get(input)
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Number of inputs with at least one dynamic axis.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, BTreeMap<usize, Dim>> {
        self.inputs.iter()
    }

    /// Check these shapes against concrete example inputs.
    pub fn validate(
        &self,
        args: &[Tensor],
        arg_names: &[String],
        kwargs: &KwargInputs<Tensor>,
    ) -> Result<()> {
        ensure!(
            arg_names.len() == args.len(),
            "expected {} positional input names, got {}",
            args.len(),
            arg_names.len()
        );
        for (i, name) in arg_names.iter().enumerate() {
            ensure!(
                !arg_names[..i].contains(name),
                "positional input name `{name}` is used more than once"
            );
            ensure!(
                !kwargs.contains_key(name),
                "input name `{name}` is both positional and keyword"
            );
        }

        let mut seen: HashMap<&str, &Dim> = HashMap::new();
        for (input, axes) in &self.inputs {
            let tensor = match arg_names.iter().position(|n| n == input) {
                Some(idx) => &args[idx],
                None => match kwargs.get(input) {
                    Some(t) => t,
                    None => bail!("dynamic shape refers to unknown input `{input}`"),
                },
            };

            for (&axis, dim) in axes {
                let Some(size) = tensor.shape.dim(axis) else {
                    bail!(
                        "input `{input}` axis {axis} is out of range for rank {}",
                        tensor.shape.rank()
                    );
                };
                if let (Some(min), Some(max)) = (dim.min, dim.max) {
                    ensure!(
                        min <= max,
                        "dim `{}` on input `{input}` has min {min} > max {max}",
                        dim.name
                    );
                }
                ensure!(
                    dim.contains(size),
                    "input `{input}` axis {axis} has example size {size} outside {dim}"
                );
                if let Some(prev) = seen.insert(dim.name.as_str(), dim) {
                    ensure!(
                        prev.same_bounds(dim),
                        "dim `{}` is declared with conflicting bounds ({prev} vs {dim})",
                        dim.name
                    );
                }
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a DynamicShapes {
    type Item = (&'a String, &'a BTreeMap<usize, Dim>);
    type IntoIter = btree_map::Iter<'a, String, BTreeMap<usize, Dim>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
