pub mod blend;
pub mod channel;
pub mod clip;
pub mod registry;

pub use blend::*;
pub use channel::*;
pub use clip::*;
pub use registry::*;
