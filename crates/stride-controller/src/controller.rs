use glam::{Quat, Vec3};
use stride_animation::{AnimationRegistry, ClipRegistry};
use stride_core::{sanitize_dt, InputSnapshot, LocomotionState, MotionState, Result, StateTransitionEvent};
use stride_fsm::{LocomotionMachine, Transition};
use stride_motion::MotionIntegrator;

use crate::config::ControllerConfig;

/// Owns the character's kinematic state, its locomotion machine and the
/// animation channels the machine drives.
pub struct CharacterController<R: AnimationRegistry = ClipRegistry> {
    machine: LocomotionMachine,
    integrator: MotionIntegrator,
    motion: MotionState,
    channels: R,
}

impl<R: AnimationRegistry> CharacterController<R> {
    pub fn new(config: ControllerConfig, channels: R) -> Result<Self> {
        config.validate()?;
        log::info!("Creating character controller");
        Ok(Self {
            machine: LocomotionMachine::new(config.machine).with_default_states(),
            integrator: MotionIntegrator::new(config.motion),
            motion: MotionState::default(),
            channels,
        })
    }

    /// Places the character before activation.
    pub fn with_motion(mut self, motion: MotionState) -> Self {
        self.motion = motion;
        self
    }

    /// Enters the initial `idle` state.
    pub fn activate(&mut self) -> Result<Transition> {
        log::info!("Activating character controller");
        self.machine.set_state(LocomotionState::Idle.name(), &mut self.channels)
    }

    /// Runs one tick: state decision, motion integration, then channel
    /// playback with completion events fed straight back to the machine.
    /// Returns the transitions that happened during the tick.
    ///
    /// A machine error (strict policy) does not cut the tick short: motion
    /// and playback still advance and every completion event is delivered.
    /// The first error is returned once the tick is complete.
    pub fn update(&mut self, dt: f32, input: &InputSnapshot) -> Result<Vec<StateTransitionEvent>> {
        let dt = sanitize_dt(dt);
        let mut transitions = Vec::new();
        let mut first_error = None;

        match self.machine.update(dt, input, &mut self.channels) {
            Ok(decided) => transitions.extend(decided.entered().cloned()),
            Err(e) => first_error = Some(e),
        }

        self.motion = self
            .integrator
            .integrate(self.motion, input, self.machine.current_kind(), dt);

        for event in self.channels.advance(dt) {
            match self.machine.notify_finished(&event, &mut self.channels) {
                Ok(finished) => transitions.extend(finished.entered().cloned()),
                Err(e) => {
                    log::debug!("Completion of '{}' failed: {}", event.channel, e);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(transitions),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.motion.position
    }

    pub fn orientation(&self) -> Quat {
        self.motion.orientation
    }

    pub fn velocity(&self) -> Vec3 {
        self.motion.velocity
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn state(&self) -> Option<LocomotionState> {
        self.machine.current_kind()
    }

    pub fn state_name(&self) -> Option<&str> {
        self.machine.current_name()
    }

    pub fn machine(&self) -> &LocomotionMachine {
        &self.machine
    }

    pub fn channels(&self) -> &R {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut R {
        &mut self.channels
    }
}
