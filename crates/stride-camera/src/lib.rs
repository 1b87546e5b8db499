//! Third-person camera that trails a target with frame-rate independent
//! exponential smoothing.

use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use stride_core::{sanitize_dt, Result, StrideError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position relative to the target, in the target's local frame.
    pub offset: Vec3,
    /// Point the camera aims at, in the target's local frame.
    pub look_at_offset: Vec3,
    /// Fraction of the remaining distance left after one second. Must lie
    /// in (0, 1); smaller is snappier.
    pub smoothing: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: Vec3::new(-15.0, 20.0, -30.0),
            look_at_offset: Vec3::new(0.0, 10.0, 50.0),
            smoothing: 0.001,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.offset.is_finite() || !self.look_at_offset.is_finite() {
            return Err(StrideError::InvalidConfiguration(
                "camera offsets must be finite".to_string(),
            ));
        }
        if !(self.smoothing > 0.0 && self.smoothing < 1.0) {
            return Err(StrideError::InvalidConfiguration(format!(
                "camera.smoothing must lie in (0, 1), got {}",
                self.smoothing
            )));
        }
        Ok(())
    }

    /// Ideal camera position and look-at point for a target pose.
    pub fn ideal(&self, position: Vec3, orientation: Quat) -> (Vec3, Vec3) {
        (
            position + orientation * self.offset,
            position + orientation * self.look_at_offset,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FollowCamera {
    config: CameraConfig,
    position: Vec3,
    look_at: Vec3,
}

impl FollowCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            position: Vec3::ZERO,
            look_at: Vec3::ZERO,
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Moves toward the ideal pose by `1 - smoothing^dt`.
    pub fn update(&mut self, dt: f32, target_position: Vec3, target_orientation: Quat) {
        let dt = sanitize_dt(dt);
        if dt == 0.0 {
            return;
        }
        let (ideal_position, ideal_look_at) = self.config.ideal(target_position, target_orientation);
        let t = 1.0 - self.config.smoothing.powf(dt);
        self.position = self.position.lerp(ideal_position, t);
        self.look_at = self.look_at.lerp(ideal_look_at, t);
        log::trace!("Camera at {:?} looking at {:?}", self.position, self.look_at);
    }

    /// Jumps straight to the ideal pose.
    pub fn snap(&mut self, target_position: Vec3, target_orientation: Quat) {
        let (position, look_at) = self.config.ideal(target_position, target_orientation);
        self.position = position;
        self.look_at = look_at;
    }

    /// Right-handed look-at rotation (camera looks down -Z). Identity when
    /// the view direction is degenerate.
    pub fn rotation(&self) -> Quat {
        let forward = (self.look_at - self.position).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        if right == Vec3::ZERO {
            return Quat::IDENTITY;
        }
        let up = right.cross(forward);
        Quat::from_mat3(&Mat3::from_cols(right, up, -forward))
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.position).inverse()
    }
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_outside_unit_interval_is_rejected() {
        for smoothing in [0.0, 1.0, -0.5, 2.0, f32::NAN] {
            let config = CameraConfig {
                smoothing,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "accepted {smoothing}");
        }
        assert!(CameraConfig::default().validate().is_ok());
    }

    #[test]
    fn degenerate_dt_leaves_camera_in_place() {
        let mut camera = FollowCamera::default();
        camera.snap(Vec3::new(1.0, 0.0, 2.0), Quat::IDENTITY);
        let before = camera.clone();
        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            camera.update(dt, Vec3::new(100.0, 0.0, 0.0), Quat::IDENTITY);
        }
        assert_eq!(camera, before);
    }

    #[test]
    fn rotation_faces_the_look_at_point() {
        let mut camera = FollowCamera::default();
        camera.snap(Vec3::ZERO, Quat::IDENTITY);
        let facing = camera.rotation() * Vec3::NEG_Z;
        let expected = (camera.look_at() - camera.position()).normalize();
        assert!(facing.abs_diff_eq(expected, 1e-4));
    }
}
