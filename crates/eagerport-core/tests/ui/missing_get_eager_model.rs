use eagerport_core::EagerModel;

struct NoModel;

impl EagerModel for NoModel {
    type Module = ();
    type Input = u32;
    type DynamicShapes = ();

    fn get_example_inputs(&self) -> Vec<Self::Input> {
        vec![1]
    }
}

fn main() {
    let _ = NoModel;
}
