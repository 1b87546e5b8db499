//! Named channel collection and completion listeners.

use std::collections::BTreeMap;

use stride_core::sanitize_dt;

use crate::channel::AnimationChannel;
use crate::clip::{ClipInfo, ClipPlayer};

/// Identifier carried by completion events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Ownership token for a completion listener.
///
/// Not clonable: the only way to deregister is to hand the token back to
/// [`AnimationRegistry::remove_finished_listener`], which consumes it.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a subscription leaks its listener"]
pub struct Subscription {
    id: SubscriptionId,
    channel: String,
}

impl Subscription {
    pub fn new(id: SubscriptionId, channel: impl Into<String>) -> Self {
        Self {
            id,
            channel: channel.into(),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }
}

/// Emitted when a `Once` channel with a registered listener reaches its end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedEvent {
    pub channel: String,
    pub subscription: SubscriptionId,
}

/// Capability interface the state machine drives. Maps state names to
/// playable channels; never decides transitions itself.
pub trait AnimationRegistry {
    type Channel: AnimationChannel;

    fn channel(&self, name: &str) -> Option<&Self::Channel>;

    fn channel_mut(&mut self, name: &str) -> Option<&mut Self::Channel>;

    fn contains(&self, name: &str) -> bool {
        self.channel(name).is_some()
    }

    /// `to.crossFadeFrom(from, duration, warp)`: fades `from` out and `to`
    /// in over `duration` seconds. Returns `false` if either channel is
    /// missing or both names are the same.
    fn cross_fade(&mut self, from: &str, to: &str, duration: f32, warp: bool) -> bool;

    /// Registers a completion listener on `name`.
    fn on_finished(&mut self, name: &str) -> Option<Subscription>;

    /// Deregisters a listener. Returns `false` if it was not registered.
    fn remove_finished_listener(&mut self, subscription: Subscription) -> bool;

    fn listener_count(&self) -> usize;

    /// Advances every channel by `dt` and returns the completion events
    /// produced by this step.
    fn advance(&mut self, dt: f32) -> Vec<FinishedEvent>;
}

#[derive(Debug, Clone)]
struct Listener {
    id: SubscriptionId,
    channel: String,
}

/// In-memory registry of [`ClipPlayer`]s keyed by state name.
#[derive(Debug, Default)]
pub struct ClipRegistry {
    channels: BTreeMap<String, ClipPlayer>,
    listeners: Vec<Listener>,
    next_id: u64,
}

impl ClipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_clips(clips: impl IntoIterator<Item = ClipInfo>) -> Self {
        let mut registry = Self::new();
        for clip in clips {
            registry.insert(clip);
        }
        registry
    }

    /// Adds (or replaces) the channel for `clip.name`.
    pub fn insert(&mut self, clip: ClipInfo) {
        log::debug!("Registering clip '{}' ({:.3}s)", clip.name, clip.duration);
        self.channels.insert(clip.name.clone(), ClipPlayer::new(clip));
    }

    pub fn with_clip(mut self, name: impl Into<String>, duration: f32) -> Self {
        self.insert(ClipInfo::new(name, duration));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl AnimationRegistry for ClipRegistry {
    type Channel = ClipPlayer;

    fn channel(&self, name: &str) -> Option<&ClipPlayer> {
        self.channels.get(name)
    }

    fn channel_mut(&mut self, name: &str) -> Option<&mut ClipPlayer> {
        self.channels.get_mut(name)
    }

    fn cross_fade(&mut self, from: &str, to: &str, duration: f32, warp: bool) -> bool {
        if from == to {
            return false;
        }
        let (Some(from_duration), Some(to_duration)) = (
            self.channels.get(from).map(ClipPlayer::duration),
            self.channels.get(to).map(ClipPlayer::duration),
        ) else {
            return false;
        };
        let duration = sanitize_dt(duration);
        let warp = warp && from_duration > 0.0 && to_duration > 0.0;

        if let Some(outgoing) = self.channels.get_mut(from) {
            outgoing.fade_out(duration);
            if warp && outgoing.is_active() {
                outgoing.warp(1.0, from_duration / to_duration, duration);
            }
        }
        if let Some(incoming) = self.channels.get_mut(to) {
            incoming.fade_in(duration);
            if warp {
                incoming.warp(to_duration / from_duration, 1.0, duration);
            }
        }

        log::trace!("Crossfade {} -> {} over {:.3}s (warp: {})", from, to, duration, warp);
        true
    }

    fn on_finished(&mut self, name: &str) -> Option<Subscription> {
        if !self.channels.contains_key(name) {
            return None;
        }
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            channel: name.to_string(),
        });
        log::trace!("Listener {:?} registered on '{}'", id, name);
        Some(Subscription::new(id, name))
    }

    fn remove_finished_listener(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != subscription.id);
        let removed = self.listeners.len() != before;
        if removed {
            log::trace!("Listener {:?} removed from '{}'", subscription.id, subscription.channel);
        }
        removed
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn advance(&mut self, dt: f32) -> Vec<FinishedEvent> {
        let dt = sanitize_dt(dt);
        if dt == 0.0 {
            return Vec::new();
        }

        let finished: Vec<&str> = self
            .channels
            .iter_mut()
            .filter_map(|(name, player)| player.advance(dt).then_some(name.as_str()))
            .collect();

        let mut events = Vec::new();
        for name in finished {
            log::trace!("Channel '{}' finished", name);
            events.extend(
                self.listeners
                    .iter()
                    .filter(|l| l.channel == name)
                    .map(|l| FinishedEvent {
                        channel: l.channel.clone(),
                        subscription: l.id,
                    }),
            );
        }
        events
    }
}
