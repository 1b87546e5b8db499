//! Tuning constants for the motion integrator.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use stride_core::{LocomotionState, Result, StrideError};

/// Configuration for velocity integration. Vectors are per local axis:
/// `x` lateral, `y` vertical, `z` forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Fraction of the current velocity removed per second (damping).
    pub decay: Vec3,

    /// Acceleration applied while a movement intent is held (units/second^2).
    pub acceleration: Vec3,

    /// Acceleration multiplier while sprinting (ignored while crouched).
    pub sprint_multiplier: f32,

    /// Yaw rate while a turn intent is held (radians/second).
    pub turn_rate: f32,

    /// States in which acceleration is suppressed entirely.
    pub locked_states: Vec<LocomotionState>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            decay: Vec3::new(0.0005, 0.0001, 5.0),
            acceleration: Vec3::new(2.0, 0.25, 70.0),
            sprint_multiplier: 4.0,
            turn_rate: std::f32::consts::PI,
            locked_states: vec![LocomotionState::CrouchIdle],
        }
    }
}

impl MotionConfig {
    pub fn is_locked(&self, state: Option<LocomotionState>) -> bool {
        state.is_some_and(|s| self.locked_states.contains(&s))
    }

    pub fn validate(&self) -> Result<()> {
        let finite_non_negative = |v: Vec3| v.is_finite() && v.min_element() >= 0.0;
        if !finite_non_negative(self.decay) {
            return Err(StrideError::InvalidConfiguration(format!(
                "motion.decay must be finite and non-negative, got {:?}",
                self.decay
            )));
        }
        if !finite_non_negative(self.acceleration) {
            return Err(StrideError::InvalidConfiguration(format!(
                "motion.acceleration must be finite and non-negative, got {:?}",
                self.acceleration
            )));
        }
        if !self.sprint_multiplier.is_finite() || self.sprint_multiplier < 0.0 {
            return Err(StrideError::InvalidConfiguration(format!(
                "motion.sprint_multiplier must be finite and non-negative, got {}",
                self.sprint_multiplier
            )));
        }
        if !self.turn_rate.is_finite() {
            return Err(StrideError::InvalidConfiguration(format!(
                "motion.turn_rate must be finite, got {}",
                self.turn_rate
            )));
        }
        Ok(())
    }
}
