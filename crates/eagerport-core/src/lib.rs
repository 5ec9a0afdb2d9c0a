pub mod adapter;
pub mod dynamic;
pub mod registry;
pub mod tensor;
pub mod trace;

pub use adapter::*;
pub use dynamic::*;
pub use registry::*;
pub use tensor::*;
pub use trace::*;
