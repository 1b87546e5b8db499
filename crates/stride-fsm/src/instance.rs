//! Live state instances and their enter/exit hooks.

use stride_animation::{AnimationChannel, AnimationRegistry, LoopMode, Subscription};
use stride_core::LocomotionState;

use crate::config::MachineConfig;

/// Builds the state a registered name stands for.
pub type StateFactory = fn() -> LocomotionState;

/// The machine's current state: its registered name (also the channel name),
/// its kind, and for `Gesture` the completion listener it owns.
#[derive(Debug)]
pub struct StateInstance {
    name: String,
    kind: LocomotionState,
    completion: Option<Subscription>,
}

impl StateInstance {
    pub(crate) fn new(name: impl Into<String>, kind: LocomotionState) -> Self {
        Self {
            name: name.into(),
            kind,
            completion: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LocomotionState {
        self.kind
    }

    pub fn completion(&self) -> Option<&Subscription> {
        self.completion.as_ref()
    }

    pub(crate) fn enter<R: AnimationRegistry>(
        &mut self,
        previous: Option<&StateInstance>,
        config: &MachineConfig,
        channels: &mut R,
    ) {
        let one_shot = self.kind.is_one_shot();
        let previous_timing = previous
            .and_then(|p| channels.channel(&p.name))
            .map(|c| (c.current_time(), c.duration()));

        let Some(channel) = channels.channel_mut(&self.name) else {
            return;
        };
        channel.set_loop_mode(if one_shot { LoopMode::Once } else { LoopMode::Repeat });
        channel.set_clamp_when_finished(one_shot);

        match previous {
            Some(previous) => {
                if one_shot {
                    channel.reset();
                }
                let in_family = config.families.contains(previous.kind, self.kind);
                match previous_timing {
                    Some((time, duration)) if in_family && duration > 0.0 => {
                        let entering = channel.duration();
                        channel.set_time(time * entering / duration);
                    }
                    _ => {
                        channel.set_time(0.0);
                        channel.set_time_scale(1.0);
                        channel.set_weight(1.0);
                    }
                }

                let blend = config.blends.duration(previous.kind, self.kind);
                channels.cross_fade(&previous.name, &self.name, blend, true);
                if let Some(channel) = channels.channel_mut(&self.name) {
                    channel.play();
                }
            }
            None => channel.play(),
        }

        if self.kind == LocomotionState::Gesture {
            self.completion = channels.on_finished(&self.name);
        }
    }

    pub(crate) fn exit<R: AnimationRegistry>(&mut self, channels: &mut R) {
        if let Some(subscription) = self.completion.take() {
            if !channels.remove_finished_listener(subscription) {
                log::warn!("Completion listener for '{}' was already gone", self.name);
            }
        }
    }
}
