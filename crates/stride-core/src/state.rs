use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::StrideError;

/// Closed set of locomotion states the controller knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocomotionState {
    Idle,
    Walk,
    Run,
    WalkBackward,
    RunBackward,
    StandToCrouch,
    CrouchWalk,
    CrouchIdle,
    StrafeLeft,
    Gesture,
}

impl LocomotionState {
    pub const ALL: [LocomotionState; 10] = [
        LocomotionState::Idle,
        LocomotionState::Walk,
        LocomotionState::Run,
        LocomotionState::WalkBackward,
        LocomotionState::RunBackward,
        LocomotionState::StandToCrouch,
        LocomotionState::CrouchWalk,
        LocomotionState::CrouchIdle,
        LocomotionState::StrafeLeft,
        LocomotionState::Gesture,
    ];

    /// Canonical registration (and animation channel) name.
    pub fn name(self) -> &'static str {
        match self {
            LocomotionState::Idle => "idle",
            LocomotionState::Walk => "walk",
            LocomotionState::Run => "run",
            LocomotionState::WalkBackward => "walk_backward",
            LocomotionState::RunBackward => "run_backward",
            LocomotionState::StandToCrouch => "stand_to_crouch",
            LocomotionState::CrouchWalk => "crouch_walk",
            LocomotionState::CrouchIdle => "crouch_idle",
            LocomotionState::StrafeLeft => "strafe_left",
            LocomotionState::Gesture => "gesture",
        }
    }

    /// One-shot states play once and clamp on their final pose.
    pub fn is_one_shot(self) -> bool {
        matches!(self, LocomotionState::StandToCrouch | LocomotionState::Gesture)
    }
}

impl fmt::Display for LocomotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LocomotionState {
    type Err = StrideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocomotionState::ALL
            .into_iter()
            .find(|state| state.name() == s)
            .ok_or_else(|| StrideError::UnknownState(s.to_string()))
    }
}

/// Record of a single state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransitionEvent {
    /// `None` for the first activation of the machine.
    pub from: Option<LocomotionState>,
    pub to: LocomotionState,
    pub from_name: Option<String>,
    pub to_name: String,
}
