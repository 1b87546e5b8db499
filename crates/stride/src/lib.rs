//! Stride - third-person character locomotion
//!
//! Stride turns a per-tick snapshot of movement intents into a moving,
//! turning, animated character: a locomotion state machine picks the
//! animation state and crossfades channels, a motion integrator applies
//! damping and acceleration, and a follow camera trails the result.

pub use stride_animation as animation;
pub use stride_camera as camera;
pub use stride_controller as controller;
pub use stride_core as core;
pub use stride_fsm as fsm;
pub use stride_motion as motion;

pub mod prelude {
    pub use crate::animation::{AnimationChannel, AnimationRegistry, ClipInfo, ClipRegistry, LoopMode};
    pub use crate::camera::{CameraConfig, FollowCamera};
    pub use crate::controller::{CharacterController, ControllerConfig, FrameDriver};
    pub use crate::core::{InputSnapshot, Intent, LocomotionState, MotionState, StrideError};
    pub use crate::fsm::{LocomotionMachine, MachineConfig, Transition, TransitionPolicy};
    pub use crate::motion::{MotionConfig, MotionIntegrator};
    pub use glam;
}
