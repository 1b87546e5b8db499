//! The character controller and its per-frame driver.

pub mod config;
pub mod controller;
pub mod driver;

pub use config::ControllerConfig;
pub use controller::CharacterController;
pub use driver::FrameDriver;
