use serde::{Deserialize, Serialize};

/// How a channel behaves when playback reaches the end of its clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Wrap back to the start and keep playing.
    #[default]
    Repeat,
    /// Play a single time, then stop.
    Once,
}

/// A single playable animation unit.
///
/// Implementations own the playback fields (time, time scale, weight, loop
/// behaviour); the state machine only issues commands.
pub trait AnimationChannel {
    /// Start (or resume) playback. A finished one-shot stays finished until
    /// [`AnimationChannel::reset`] is called.
    fn play(&mut self);

    /// Stop playback and drop any pending fade or warp.
    fn stop(&mut self);

    /// Rewind to time zero, clear the finished flag and cancel fades/warps.
    fn reset(&mut self);

    fn set_loop_mode(&mut self, mode: LoopMode);

    fn set_clamp_when_finished(&mut self, clamp: bool);

    fn set_time(&mut self, seconds: f32);

    /// Sets the effective time scale, cancelling any warp in progress.
    fn set_time_scale(&mut self, scale: f32);

    /// Sets the base weight, cancelling any fade in progress.
    fn set_weight(&mut self, weight: f32);

    fn duration(&self) -> f32;

    fn current_time(&self) -> f32;

    fn time_scale(&self) -> f32;

    fn weight(&self) -> f32;

    /// Weight actually contributed to the blended pose this tick.
    fn effective_weight(&self) -> f32;

    fn loop_mode(&self) -> LoopMode;

    fn is_playing(&self) -> bool;

    fn is_finished(&self) -> bool;
}
