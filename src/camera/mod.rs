//! Camera Rig
//!
//! Two mutually exclusive controllers share the control stream:
//!
//! - **Orbit follow** (default): a damped spherical orbit around a point above
//!   the character, steered by mouse drag and scroll only.
//! - **Free fly** (while the camera modifier is held): the movement keys
//!   translate the camera and its look target together.
//!
//! The mode is a tagged variant and [`CameraRig::update`] is the single
//! dispatch point, so exactly one controller runs per tick. Switching is an
//! immediate hand-off from the current camera pose; nothing is blended.

pub mod free_fly;
pub mod orbit;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::input::{Input, InputState};
use crate::scene::transform::Transform;

pub use free_fly::FreeFlySettings;
pub use orbit::{OrbitSettings, OrbitState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub orbit: OrbitSettings,
    pub free_fly: FreeFlySettings,
    /// Vertical field of view, used to frame the environment on load.
    pub fov_degrees: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            orbit: OrbitSettings::default(),
            free_fly: FreeFlySettings::default(),
            fov_degrees: 75.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    OrbitFollow(OrbitState),
    FreeFly,
}

#[derive(Debug, Clone)]
pub struct CameraRig {
    pub settings: CameraSettings,
    mode: CameraMode,
    position: Vec3,
    target: Vec3,
}

impl CameraRig {
    /// A rig in orbit mode, starting from the given pose.
    #[must_use]
    pub fn new(position: Vec3, target: Vec3, settings: CameraSettings) -> Self {
        Self {
            mode: CameraMode::OrbitFollow(OrbitState::from_camera(position, target, &settings.orbit)),
            settings,
            position,
            target,
        }
    }

    #[must_use]
    pub fn mode(&self) -> &CameraMode {
        &self.mode
    }

    #[must_use]
    pub fn is_free_fly(&self) -> bool {
        matches!(self.mode, CameraMode::FreeFly)
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Camera transform looking at the target, for the renderer.
    #[must_use]
    pub fn transform(&self) -> Transform {
        let mut transform = Transform::from_position(self.position);
        transform.look_at(self.target, Vec3::Y);
        transform
    }

    /// Selects the mode from the camera modifier and runs that controller.
    ///
    /// `pointer` supplies mouse drag and scroll for the orbit controller;
    /// `follow_point` is where the orbit should be centred.
    pub fn update(&mut self, input: &InputState, pointer: &Input, follow_point: Vec3, dt: f32) {
        match (&self.mode, input.camera_modifier) {
            (CameraMode::OrbitFollow(_), true) => {
                log::debug!("Camera -> free fly");
                self.mode = CameraMode::FreeFly;
            }
            (CameraMode::FreeFly, false) => {
                log::debug!("Camera -> orbit follow");
                self.mode = CameraMode::OrbitFollow(OrbitState::from_camera(
                    self.position,
                    self.target,
                    &self.settings.orbit,
                ));
            }
            _ => {}
        }

        match &mut self.mode {
            CameraMode::OrbitFollow(state) => {
                state.apply_pointer(pointer, &self.settings.orbit, self.settings.fov_degrees);
                let (position, target) = state.update(&self.settings.orbit, follow_point, dt);
                self.position = position;
                self.target = target;
            }
            CameraMode::FreeFly => {
                let (position, target) =
                    free_fly::fly(self.position, self.target, input, &self.settings.free_fly, dt);
                self.position = position;
                self.target = target;
            }
        }
    }
}
