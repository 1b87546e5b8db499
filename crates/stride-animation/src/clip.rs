use serde::{Deserialize, Serialize};
use stride_core::sanitize_dt;

use crate::blend::Ramp;
use crate::channel::{AnimationChannel, LoopMode};

/// Metadata of a pre-loaded clip. Decoding the keyframes is the asset
/// loader's job; playback only needs the duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipInfo {
    pub name: String,
    pub duration: f32,
}

impl ClipInfo {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration: if duration.is_finite() { duration.max(0.0) } else { 0.0 },
        }
    }
}

/// In-memory playback of one clip: time, weight, loop behaviour and the
/// fade/warp ramps started by a crossfade.
#[derive(Debug, Clone)]
pub struct ClipPlayer {
    clip: ClipInfo,
    time: f32,
    time_scale: f32,
    weight: f32,
    loop_mode: LoopMode,
    clamp_when_finished: bool,
    // contributes to the pose
    active: bool,
    // time is advancing
    playing: bool,
    finished: bool,
    fade: Option<Ramp>,
    fade_factor: f32,
    warp: Option<Ramp>,
}

impl ClipPlayer {
    pub fn new(clip: ClipInfo) -> Self {
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            loop_mode: LoopMode::Repeat,
            clamp_when_finished: false,
            active: false,
            playing: false,
            finished: false,
            fade: None,
            fade_factor: 1.0,
            warp: None,
        }
    }

    pub fn clip(&self) -> &ClipInfo {
        &self.clip
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn is_warping(&self) -> bool {
        self.warp.is_some()
    }

    /// Playback position as a fraction of the clip.
    pub fn normalized_time(&self) -> f32 {
        if self.clip.duration > 0.0 {
            self.time / self.clip.duration
        } else {
            0.0
        }
    }

    pub fn fade_in(&mut self, duration: f32) {
        self.schedule_fade(0.0, 1.0, duration);
    }

    /// Fades the channel out. An inactive channel already contributes
    /// nothing, so no ramp is scheduled for it.
    pub fn fade_out(&mut self, duration: f32) {
        if !self.active {
            self.fade = None;
            return;
        }
        self.schedule_fade(self.fade_factor, 0.0, duration);
        if self.fade.is_none() && self.fade_factor <= 0.0 {
            self.stop();
        }
    }

    /// Ramps the time scale from `start` to `end` over `duration` seconds.
    pub fn warp(&mut self, start: f32, end: f32, duration: f32) {
        let ramp = Ramp::new(start, end, duration);
        if ramp.is_done() {
            self.time_scale = end;
            self.warp = None;
        } else {
            self.time_scale = start;
            self.warp = Some(ramp);
        }
    }

    fn schedule_fade(&mut self, from: f32, to: f32, duration: f32) {
        let ramp = Ramp::new(from, to, duration);
        if ramp.is_done() {
            self.fade_factor = to;
            self.fade = None;
        } else {
            self.fade_factor = from;
            self.fade = Some(ramp);
        }
    }

    /// Advances ramps and playback. Returns `true` when a `Once` clip
    /// reached its end during this call.
    pub fn advance(&mut self, dt: f32) -> bool {
        let dt = sanitize_dt(dt);
        if dt == 0.0 || !self.active {
            return false;
        }

        if let Some(fade) = self.fade.as_mut() {
            fade.advance(dt);
            self.fade_factor = fade.value();
            if fade.is_done() {
                self.fade = None;
                if self.fade_factor <= 0.0 {
                    self.stop();
                    return false;
                }
            }
        }

        if let Some(warp) = self.warp.as_mut() {
            warp.advance(dt);
            self.time_scale = warp.value();
            if warp.is_done() {
                self.warp = None;
            }
        }

        if !self.playing || self.finished {
            return false;
        }

        let duration = self.clip.duration;
        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Repeat => {
                self.time = if duration > 0.0 {
                    self.time.rem_euclid(duration)
                } else {
                    0.0
                };
                false
            }
            LoopMode::Once => {
                if self.time < duration && self.time >= 0.0 {
                    return false;
                }
                self.finished = true;
                self.playing = false;
                if self.clamp_when_finished {
                    self.time = if self.time_scale < 0.0 { 0.0 } else { duration };
                } else {
                    self.time = 0.0;
                    self.active = false;
                }
                true
            }
        }
    }
}

impl AnimationChannel for ClipPlayer {
    fn play(&mut self) {
        self.active = true;
        if !self.finished {
            self.playing = true;
        }
    }

    fn stop(&mut self) {
        self.active = false;
        self.playing = false;
        self.fade = None;
        self.fade_factor = 1.0;
        self.warp = None;
    }

    fn reset(&mut self) {
        self.time = 0.0;
        self.finished = false;
        self.fade = None;
        self.fade_factor = 1.0;
        self.warp = None;
        self.playing = self.active;
    }

    fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
    }

    fn set_clamp_when_finished(&mut self, clamp: bool) {
        self.clamp_when_finished = clamp;
    }

    fn set_time(&mut self, seconds: f32) {
        if !seconds.is_finite() {
            return;
        }
        let duration = self.clip.duration;
        self.time = match self.loop_mode {
            LoopMode::Repeat if duration > 0.0 => seconds.rem_euclid(duration),
            _ => seconds.clamp(0.0, duration),
        };
        if self.time < duration {
            self.finished = false;
            self.playing = self.active;
        }
    }

    fn set_time_scale(&mut self, scale: f32) {
        if scale.is_finite() {
            self.time_scale = scale;
            self.warp = None;
        }
    }

    fn set_weight(&mut self, weight: f32) {
        if weight.is_finite() {
            self.weight = weight;
            self.fade = None;
            self.fade_factor = 1.0;
        }
    }

    fn duration(&self) -> f32 {
        self.clip.duration
    }

    fn current_time(&self) -> f32 {
        self.time
    }

    fn time_scale(&self) -> f32 {
        self.time_scale
    }

    fn weight(&self) -> f32 {
        self.weight
    }

    fn effective_weight(&self) -> f32 {
        if self.active {
            self.weight * self.fade_factor
        } else {
            0.0
        }
    }

    fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    fn is_playing(&self) -> bool {
        self.active && self.playing
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}
