use glam::{Quat, Vec3};
use stride_core::{sanitize_dt, InputSnapshot, LocomotionState, MotionState};

use crate::config::MotionConfig;

/// Converts input and elapsed time into velocity, orientation and position.
#[derive(Debug, Clone, Default)]
pub struct MotionIntegrator {
    config: MotionConfig,
}

impl MotionIntegrator {
    pub fn new(config: MotionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Advances `state` by one tick.
    ///
    /// `active` is the state machine's current state; acceleration is
    /// suppressed while it is one of the configured locked states.
    pub fn integrate(
        &self,
        state: MotionState,
        input: &InputSnapshot,
        active: Option<LocomotionState>,
        dt: f32,
    ) -> MotionState {
        let dt = sanitize_dt(dt);
        if dt == 0.0 {
            return state;
        }

        let mut velocity = state.velocity + self.frame_decay(state.velocity, dt);

        let mut acceleration = self.config.acceleration;
        if input.sprint && !input.crouch {
            acceleration *= self.config.sprint_multiplier;
        }
        if self.config.is_locked(active) {
            acceleration = Vec3::ZERO;
        }

        if input.forward {
            velocity.z += acceleration.z * dt;
        }
        if input.backward {
            velocity.z -= acceleration.z * dt;
        }

        let mut orientation = state.orientation;
        if input.left {
            orientation *= Quat::from_axis_angle(Vec3::Y, self.config.turn_rate * dt);
        }
        if input.right {
            orientation *= Quat::from_axis_angle(Vec3::Y, -self.config.turn_rate * dt);
        }
        let orientation = orientation.normalize();

        let forward = (orientation * Vec3::Z).normalize_or_zero();
        let sideways = (orientation * Vec3::X).normalize_or_zero();
        let position = state.position + forward * (velocity.z * dt) + sideways * (velocity.x * dt);

        log::trace!(
            "Integrated dt={:.4} velocity={:?} position={:?}",
            dt,
            velocity,
            position
        );

        MotionState {
            velocity,
            position,
            orientation,
        }
    }

    /// Damping for this tick. Never larger in magnitude than the velocity it
    /// acts on, so it cannot flip a component's sign.
    fn frame_decay(&self, velocity: Vec3, dt: f32) -> Vec3 {
        let raw = -velocity * self.config.decay * dt;
        Vec3::new(
            clamp_to_magnitude(raw.x, velocity.x),
            clamp_to_magnitude(raw.y, velocity.y),
            clamp_to_magnitude(raw.z, velocity.z),
        )
    }
}

fn clamp_to_magnitude(decay: f32, velocity: f32) -> f32 {
    decay.signum() * decay.abs().min(velocity.abs())
}
