//! Per-tick input snapshot.
//!
//! The snapshot is filled by whatever captures raw device input and is read
//! (never written) by the state machine and the motion integrator.

/// Named control intents understood by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Forward,
    Backward,
    Left,
    Right,
    Crouch,
    Sprint,
    Gesture,
}

impl Intent {
    pub const ALL: [Intent; 7] = [
        Intent::Forward,
        Intent::Backward,
        Intent::Left,
        Intent::Right,
        Intent::Crouch,
        Intent::Sprint,
        Intent::Gesture,
    ];
}

/// Held/triggered state of every intent for the current tick. No history.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Crouch modifier held.
    pub crouch: bool,
    /// Sprint modifier held.
    pub sprint: bool,
    /// Gesture trigger (plays the one-shot gesture clip from idle).
    pub gesture: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, intent: Intent, pressed: bool) {
        match intent {
            Intent::Forward => self.forward = pressed,
            Intent::Backward => self.backward = pressed,
            Intent::Left => self.left = pressed,
            Intent::Right => self.right = pressed,
            Intent::Crouch => self.crouch = pressed,
            Intent::Sprint => self.sprint = pressed,
            Intent::Gesture => self.gesture = pressed,
        }
    }

    /// Builder-style variant of [`InputSnapshot::set`].
    pub fn with(mut self, intent: Intent, pressed: bool) -> Self {
        self.set(intent, pressed);
        self
    }

    pub fn is_pressed(&self, intent: Intent) -> bool {
        match intent {
            Intent::Forward => self.forward,
            Intent::Backward => self.backward,
            Intent::Left => self.left,
            Intent::Right => self.right,
            Intent::Crouch => self.crouch,
            Intent::Sprint => self.sprint,
            Intent::Gesture => self.gesture,
        }
    }

    /// True when either forward or backward is held.
    pub fn any_movement(&self) -> bool {
        self.forward || self.backward
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
