//! Motion integration: damping, input-gated acceleration, yaw and
//! world-space position update.

pub mod config;
pub mod integrator;

pub use config::MotionConfig;
pub use integrator::MotionIntegrator;
