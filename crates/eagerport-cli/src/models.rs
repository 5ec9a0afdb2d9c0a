//! Demo adapters shipped with the CLI.

use eagerport_core::{DType, Dim, DynamicShapes, EagerModel, KwargInputs, NamedInputs, Tensor};

#[derive(Clone, Debug)]
pub struct Mlp {
    pub widths: Vec<usize>,
}

pub struct MlpModel {
    widths: Vec<usize>,
}

impl Default for MlpModel {
    fn default() -> Self {
        Self {
            widths: vec![16, 32, 4],
        }
    }
}

impl EagerModel for MlpModel {
    type Module = Mlp;
    type Input = Tensor;
    type DynamicShapes = DynamicShapes;

    fn get_eager_model(&self) -> Mlp {
        Mlp {
            widths: self.widths.clone(),
        }
    }

    fn get_example_inputs(&self) -> Vec<Tensor> {
        let module = self.get_eager_model();
        let in_features = module.widths.first().copied().unwrap_or(1);
        vec![Tensor::zeros(DType::F32, &[1, in_features])]
    }
}

impl NamedInputs for MlpModel {}

#[derive(Clone, Debug)]
pub struct Attention {
    pub heads: usize,
    pub embed_dim: usize,
}

pub struct AttentionModel {
    heads: usize,
    embed_dim: usize,
    max_seq: usize,
}

impl Default for AttentionModel {
    fn default() -> Self {
        Self {
            heads: 4,
            embed_dim: 64,
            max_seq: 512,
        }
    }
}

impl EagerModel for AttentionModel {
    type Module = Attention;
    type Input = Tensor;
    type DynamicShapes = DynamicShapes;

    fn get_eager_model(&self) -> Attention {
        Attention {
            heads: self.heads,
            embed_dim: self.embed_dim,
        }
    }

    fn get_example_inputs(&self) -> Vec<Tensor> {
        let module = self.get_eager_model();
        vec![Tensor::zeros(DType::F32, &[2, 16, module.embed_dim])]
    }

    fn get_example_kwarg_inputs(&self) -> KwargInputs<Tensor> {
        let module = self.get_eager_model();
        let mask = Tensor::zeros(DType::U8, &[2, module.heads, 16, 16]);
        KwargInputs::from([("mask".to_string(), mask)])
    }

    fn get_dynamic_shapes(&self) -> Option<DynamicShapes> {
        let batch = Dim::new("batch").with_min(1);
        let seq = Dim::new("seq").with_min(1).with_max(self.max_seq);
        Some(
            DynamicShapes::new()
                .with("x", 0, batch.clone())
                .with("x", 1, seq.clone())
                .with("mask", 0, batch)
                .with("mask", 2, seq.clone())
                .with("mask", 3, seq),
        )
    }
}

impl NamedInputs for AttentionModel {
    fn arg_names(&self, _count: usize) -> Vec<String> {
        vec!["x".to_string()]
    }
}

#[derive(Clone, Debug)]
pub struct DepthwiseConv2d {
    pub channels: usize,
    pub kernel: usize,
}

pub struct ConvModel {
    channels: usize,
    image: usize,
}

impl Default for ConvModel {
    fn default() -> Self {
        Self {
            channels: 3,
            image: 224,
        }
    }
}

impl EagerModel for ConvModel {
    type Module = DepthwiseConv2d;
    type Input = Tensor;
    type DynamicShapes = DynamicShapes;

    fn get_eager_model(&self) -> DepthwiseConv2d {
        DepthwiseConv2d {
            channels: self.channels,
            kernel: 3,
        }
    }

    fn get_example_inputs(&self) -> Vec<Tensor> {
        let module = self.get_eager_model();
        vec![Tensor::zeros(
            DType::F32,
            &[1, module.channels, self.image, self.image],
        )]
    }

    fn get_dynamic_shapes(&self) -> Option<DynamicShapes> {
        // spatial dims can shrink down to one kernel window
        let kernel = self.get_eager_model().kernel;
        Some(
            DynamicShapes::new()
                .with("input0", 0, Dim::new("batch").with_min(1).with_max(64))
                .with("input0", 2, Dim::new("height").with_min(kernel))
                .with("input0", 3, Dim::new("width").with_min(kernel)),
        )
    }
}

impl NamedInputs for ConvModel {}
