//! Core types shared across the Stride crates: the per-tick input snapshot,
//! the character's kinematic state, the locomotion state tags and the error
//! taxonomy.

pub mod error;
pub mod input;
pub mod motion;
pub mod state;

pub use error::*;
pub use input::*;
pub use motion::*;
pub use state::*;

pub use glam;

/// Treats non-positive or non-finite deltas as a zero-length tick.
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}
