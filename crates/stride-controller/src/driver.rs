use stride_animation::{AnimationRegistry, ClipRegistry};
use stride_camera::FollowCamera;
use stride_core::{InputSnapshot, Result, StateTransitionEvent};

use crate::config::ControllerConfig;
use crate::controller::CharacterController;

/// Calls the controller once per tick and keeps the follow camera on it.
pub struct FrameDriver<R: AnimationRegistry = ClipRegistry> {
    controller: CharacterController<R>,
    camera: FollowCamera,
    frames: u64,
}

impl<R: AnimationRegistry> FrameDriver<R> {
    pub fn new(config: ControllerConfig, channels: R) -> Result<Self> {
        let camera = FollowCamera::new(config.camera.clone());
        let controller = CharacterController::new(config, channels)?;
        Ok(Self {
            controller,
            camera,
            frames: 0,
        })
    }

    /// Activates the controller and puts the camera at its resting pose.
    pub fn start(&mut self) -> Result<()> {
        self.controller.activate()?;
        self.camera
            .snap(self.controller.position(), self.controller.orientation());
        Ok(())
    }

    /// Advances the controller and the camera. The camera follows even when
    /// the controller reports an error for this tick.
    pub fn tick(&mut self, dt: f32, input: &InputSnapshot) -> Result<Vec<StateTransitionEvent>> {
        let result = self.controller.update(dt, input);
        self.camera
            .update(dt, self.controller.position(), self.controller.orientation());
        self.frames += 1;
        result
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn controller(&self) -> &CharacterController<R> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CharacterController<R> {
        &mut self.controller
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }
}
