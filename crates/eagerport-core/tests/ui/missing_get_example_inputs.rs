use eagerport_core::EagerModel;

struct NoInputs;

impl EagerModel for NoInputs {
    type Module = ();
    type Input = u32;
    type DynamicShapes = ();

    fn get_eager_model(&self) -> Self::Module {}
}

fn main() {
    let _ = NoInputs;
}
