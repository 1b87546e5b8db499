//! Locomotion state machine.
//!
//! States are a closed set ([`stride_core::LocomotionState`]); the machine
//! maps registered names to them, decides transitions from the per-tick
//! input, and drives the matching animation channels through an
//! [`stride_animation::AnimationRegistry`].

pub mod config;
pub mod decide;
pub mod instance;
pub mod machine;

pub use config::*;
pub use decide::decide;
pub use instance::*;
pub use machine::*;
