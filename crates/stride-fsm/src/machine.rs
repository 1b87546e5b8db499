use std::collections::HashMap;

use stride_animation::{AnimationRegistry, FinishedEvent};
use stride_core::{sanitize_dt, InputSnapshot, LocomotionState, Result, StateTransitionEvent, StrideError};

use crate::config::{MachineConfig, TransitionPolicy};
use crate::decide::decide;
use crate::instance::{StateFactory, StateInstance};

/// A transition request that could not be honoured because of missing setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigGap {
    /// No factory is registered under this name.
    Unregistered(String),
    /// The name is registered but the registry has no channel for it.
    MissingChannel(String),
}

impl From<ConfigGap> for StrideError {
    fn from(gap: ConfigGap) -> Self {
        match gap {
            ConfigGap::Unregistered(name) => StrideError::UnknownState(name),
            ConfigGap::MissingChannel(name) => StrideError::MissingChannel(name),
        }
    }
}

/// Outcome of a transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Entered(StateTransitionEvent),
    /// The requested state is already current, or nothing was requested.
    Unchanged,
    /// Lenient policy swallowed a configuration gap.
    Ignored(ConfigGap),
}

impl Transition {
    pub fn entered(&self) -> Option<&StateTransitionEvent> {
        match self {
            Transition::Entered(event) => Some(event),
            _ => None,
        }
    }
}

/// Finite state machine over [`LocomotionState`]s, driving the animation
/// channels of an [`AnimationRegistry`].
///
/// At most one state is current. Transitions run `exit` on the outgoing
/// state before `enter` on the incoming one, and requesting the current
/// state again is a no-op.
pub struct LocomotionMachine {
    factories: HashMap<String, StateFactory>,
    current: Option<StateInstance>,
    config: MachineConfig,
}

impl LocomotionMachine {
    pub fn new(config: MachineConfig) -> Self {
        log::info!("Creating locomotion machine (policy: {:?})", config.policy);
        Self {
            factories: HashMap::new(),
            current: None,
            config,
        }
    }

    /// Registers every canonical state under its canonical name.
    pub fn with_default_states(mut self) -> Self {
        for state in LocomotionState::ALL {
            self.register_state(state.name(), default_factory(state));
        }
        self
    }

    /// Associates `name` with `factory`. Re-registering a name replaces the
    /// previous factory.
    pub fn register_state(&mut self, name: impl Into<String>, factory: StateFactory) {
        let name = name.into();
        log::debug!("Registering state '{}' as {}", name, factory());
        self.factories.insert(name, factory);
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn current(&self) -> Option<&StateInstance> {
        self.current.as_ref()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(StateInstance::name)
    }

    pub fn current_kind(&self) -> Option<LocomotionState> {
        self.current.as_ref().map(StateInstance::kind)
    }

    /// Makes `name` the current state.
    pub fn set_state<R: AnimationRegistry>(&mut self, name: &str, channels: &mut R) -> Result<Transition> {
        if self.current_name() == Some(name) {
            return Ok(Transition::Unchanged);
        }

        let Some(factory) = self.factories.get(name).copied() else {
            return self.gap(ConfigGap::Unregistered(name.to_string()));
        };
        if !channels.contains(name) {
            return self.gap(ConfigGap::MissingChannel(name.to_string()));
        }

        let mut previous = self.current.take();
        if let Some(previous) = previous.as_mut() {
            previous.exit(channels);
        }

        let mut next = StateInstance::new(name, factory());
        next.enter(previous.as_ref(), &self.config, channels);

        let event = StateTransitionEvent {
            from: previous.as_ref().map(StateInstance::kind),
            to: next.kind(),
            from_name: previous.as_ref().map(|p| p.name().to_string()),
            to_name: next.name().to_string(),
        };
        log::debug!(
            "State transition: {} -> {}",
            event.from_name.as_deref().unwrap_or("<none>"),
            event.to_name
        );

        self.current = Some(next);
        Ok(Transition::Entered(event))
    }

    /// Lets the current state react to this tick's input. Issues at most one
    /// transition.
    pub fn update<R: AnimationRegistry>(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        channels: &mut R,
    ) -> Result<Transition> {
        let Some(kind) = self.current_kind() else {
            return Ok(Transition::Unchanged);
        };
        log::trace!("Machine update in {} (dt={:.4})", kind, sanitize_dt(dt));
        match decide(kind, input) {
            Some(target) if target != kind => {
                let name = self.registered_name(target);
                self.set_state(&name, channels)
            }
            _ => Ok(Transition::Unchanged),
        }
    }

    /// Routes a completion event to the current state. Only a `Gesture`
    /// holding the matching subscription reacts, by returning to idle.
    pub fn notify_finished<R: AnimationRegistry>(
        &mut self,
        event: &FinishedEvent,
        channels: &mut R,
    ) -> Result<Transition> {
        let owns_event = self.current.as_ref().is_some_and(|state| {
            state.kind() == LocomotionState::Gesture
                && state.completion().is_some_and(|sub| sub.id() == event.subscription)
        });
        if !owns_event {
            log::trace!("Ignoring completion of '{}'", event.channel);
            return Ok(Transition::Unchanged);
        }
        let name = self.registered_name(LocomotionState::Idle);
        self.set_state(&name, channels)
    }

    /// Name to request when a rule targets `kind`: the canonical name if it
    /// builds `kind`, else the first (sorted) custom name that does, else the
    /// canonical name so the gap is reported under it.
    pub fn registered_name(&self, kind: LocomotionState) -> String {
        let builds = |name: &str| self.factories.get(name).is_some_and(|f| f() == kind);
        if builds(kind.name()) {
            return kind.name().to_string();
        }
        self.factories
            .iter()
            .filter(|(_, factory)| factory() == kind)
            .map(|(name, _)| name.as_str())
            .min()
            .unwrap_or(kind.name())
            .to_string()
    }

    fn gap(&self, gap: ConfigGap) -> Result<Transition> {
        match self.config.policy {
            TransitionPolicy::Lenient => {
                log::warn!("Transition ignored: {:?}", gap);
                Ok(Transition::Ignored(gap))
            }
            TransitionPolicy::Strict => Err(gap.into()),
        }
    }
}

impl Default for LocomotionMachine {
    fn default() -> Self {
        Self::new(MachineConfig::default()).with_default_states()
    }
}

fn default_factory(state: LocomotionState) -> StateFactory {
    match state {
        LocomotionState::Idle => || LocomotionState::Idle,
        LocomotionState::Walk => || LocomotionState::Walk,
        LocomotionState::Run => || LocomotionState::Run,
        LocomotionState::WalkBackward => || LocomotionState::WalkBackward,
        LocomotionState::RunBackward => || LocomotionState::RunBackward,
        LocomotionState::StandToCrouch => || LocomotionState::StandToCrouch,
        LocomotionState::CrouchWalk => || LocomotionState::CrouchWalk,
        LocomotionState::CrouchIdle => || LocomotionState::CrouchIdle,
        LocomotionState::StrafeLeft => || LocomotionState::StrafeLeft,
        LocomotionState::Gesture => || LocomotionState::Gesture,
    }
}
