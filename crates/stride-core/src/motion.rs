use glam::{Quat, Vec3};

/// Kinematic state of the controlled character.
///
/// `velocity` is expressed in the character's local frame: `x` lateral,
/// `y` vertical, `z` forward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    pub velocity: Vec3,
    pub position: Vec3,
    pub orientation: Quat,
}

impl MotionState {
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            velocity: Vec3::ZERO,
            position,
            orientation: orientation.normalize(),
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// World-space forward direction (local +Z).
    pub fn forward(&self) -> Vec3 {
        (self.orientation * Vec3::Z).normalize_or_zero()
    }

    /// World-space lateral direction (local +X).
    pub fn right(&self) -> Vec3 {
        (self.orientation * Vec3::X).normalize_or_zero()
    }

    pub fn forward_speed(&self) -> f32 {
        self.velocity.z
    }

    pub fn has_forward_speed(&self, epsilon: f32) -> bool {
        self.velocity.z.abs() > epsilon
    }
}

impl Default for MotionState {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}
