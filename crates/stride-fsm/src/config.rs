//! Machine configuration: gap policy, blend durations and cycle families.

use serde::{Deserialize, Serialize};
use stride_core::{LocomotionState, Result, StrideError};

/// What to do when a transition names an unregistered state or a state
/// without an animation channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Log a warning and keep the current state.
    #[default]
    Lenient,
    /// Return an error and keep the current state.
    Strict,
}

/// A single blend-duration override. `from = None` matches any source state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendOverride {
    #[serde(default)]
    pub from: Option<LocomotionState>,
    pub to: LocomotionState,
    pub duration: f32,
}

/// Crossfade durations, looked up by exact pair, then by target, then the
/// global default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendTable {
    pub default_duration: f32,
    pub overrides: Vec<BlendOverride>,
}

impl Default for BlendTable {
    fn default() -> Self {
        let to = |to, duration| BlendOverride {
            from: None,
            to,
            duration,
        };
        Self {
            default_duration: 0.5,
            overrides: vec![
                to(LocomotionState::WalkBackward, 0.1),
                to(LocomotionState::StandToCrouch, 0.2),
                to(LocomotionState::Gesture, 0.2),
            ],
        }
    }
}

impl BlendTable {
    pub fn duration(&self, from: LocomotionState, to: LocomotionState) -> f32 {
        self.overrides
            .iter()
            .find(|o| o.from == Some(from) && o.to == to)
            .or_else(|| self.overrides.iter().find(|o| o.from.is_none() && o.to == to))
            .map_or(self.default_duration, |o| o.duration)
    }

    /// Adds an override for an exact `(from, to)` pair.
    pub fn with_pair(mut self, from: LocomotionState, to: LocomotionState, duration: f32) -> Self {
        self.overrides.push(BlendOverride {
            from: Some(from),
            to,
            duration,
        });
        self
    }
}

/// Pairs of states whose clips represent the same physical cycle. Entering
/// one from the other keeps the relative phase instead of restarting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleFamilies(pub Vec<[LocomotionState; 2]>);

impl Default for CycleFamilies {
    fn default() -> Self {
        use LocomotionState::*;
        Self(vec![[Walk, Run], [Walk, RunBackward], [Walk, StrafeLeft]])
    }
}

impl CycleFamilies {
    /// Symmetric membership test.
    pub fn contains(&self, a: LocomotionState, b: LocomotionState) -> bool {
        self.0
            .iter()
            .any(|&[x, y]| (x == a && y == b) || (x == b && y == a))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub policy: TransitionPolicy,
    pub blends: BlendTable,
    pub families: CycleFamilies,
}

impl MachineConfig {
    pub fn strict() -> Self {
        Self {
            policy: TransitionPolicy::Strict,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let valid = |d: f32| d.is_finite() && d >= 0.0;
        if !valid(self.blends.default_duration) {
            return Err(StrideError::InvalidConfiguration(format!(
                "machine.blends.default_duration must be finite and non-negative, got {}",
                self.blends.default_duration
            )));
        }
        if let Some(bad) = self.blends.overrides.iter().find(|o| !valid(o.duration)) {
            return Err(StrideError::InvalidConfiguration(format!(
                "blend duration into '{}' must be finite and non-negative, got {}",
                bad.to, bad.duration
            )));
        }
        Ok(())
    }
}
