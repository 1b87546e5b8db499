//! Per-state transition rules.
//!
//! Each arm checks its guards in order and the first match wins. `None`
//! keeps the current state. Rows that re-affirm the current state return it
//! explicitly; the machine treats that as a no-op.

use stride_core::{InputSnapshot, LocomotionState};

pub fn decide(state: LocomotionState, input: &InputSnapshot) -> Option<LocomotionState> {
    use LocomotionState::*;

    let InputSnapshot {
        forward,
        backward,
        left,
        crouch,
        sprint,
        gesture,
        ..
    } = *input;
    let moving = forward || backward;

    match state {
        Idle => {
            if moving {
                Some(Walk)
            } else if crouch {
                Some(StandToCrouch)
            } else if gesture {
                Some(Gesture)
            } else {
                None
            }
        }
        Walk => {
            if forward && sprint && !crouch {
                Some(Run)
            } else if forward && crouch {
                Some(CrouchWalk)
            } else if backward {
                Some(WalkBackward)
            } else if !moving {
                Some(Idle)
            } else {
                None
            }
        }
        WalkBackward => {
            if backward && sprint {
                Some(RunBackward)
            } else if backward {
                Some(WalkBackward)
            } else {
                Some(Idle)
            }
        }
        Run => {
            if moving && !sprint && !crouch {
                Some(Walk)
            } else if moving && crouch {
                Some(CrouchWalk)
            } else if !moving {
                Some(Idle)
            } else {
                None
            }
        }
        StandToCrouch => {
            if crouch && forward {
                Some(CrouchWalk)
            } else if !crouch {
                Some(Idle)
            } else {
                None
            }
        }
        RunBackward => {
            if backward && !sprint {
                Some(Walk)
            } else if !backward {
                Some(Idle)
            } else {
                None
            }
        }
        CrouchWalk => {
            if forward && crouch {
                Some(CrouchWalk)
            } else if forward && sprint {
                Some(Run)
            } else if forward {
                Some(Walk)
            } else {
                Some(CrouchIdle)
            }
        }
        CrouchIdle => {
            if crouch && forward {
                Some(CrouchWalk)
            } else if forward {
                Some(Walk)
            } else if !crouch {
                Some(Idle)
            } else {
                None
            }
        }
        StrafeLeft => {
            if left {
                Some(StrafeLeft)
            } else {
                Some(Idle)
            }
        }
        // Completion is delivered separately through the finished listener.
        Gesture => {
            if forward {
                Some(Walk)
            } else if backward {
                Some(WalkBackward)
            } else {
                None
            }
        }
    }
}
