//! Aggregated controller configuration, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use stride_camera::CameraConfig;
use stride_core::{Result, StrideError};
use stride_fsm::MachineConfig;
use stride_motion::MotionConfig;

/// Every tunable of a controller. Missing sections and fields fall back to
/// their defaults.
///
/// ```toml
/// [motion]
/// sprint_multiplier = 3.0
/// locked_states = ["crouch_idle", "gesture"]
///
/// [machine]
/// policy = "strict"
/// families = [["walk", "run"]]
///
/// [[machine.blends.overrides]]
/// to = "walk_backward"
/// duration = 0.1
///
/// [camera]
/// smoothing = 0.01
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub motion: MotionConfig,
    pub machine: MachineConfig,
    pub camera: CameraConfig,
}

impl ControllerConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)
            .map_err(|e| StrideError::InvalidConfiguration(format!("parse controller TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("Loaded controller config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| StrideError::InvalidConfiguration(format!("serialize controller TOML: {e}")))
    }

    pub fn validate(&self) -> Result<()> {
        self.motion.validate()?;
        self.machine.validate()?;
        self.camera.validate()
    }
}
