//! Viewer
//!
//! Owns the character, its locomotion controller, the animation mixer and
//! the camera rig, and advances them together once per rendered frame:
//!
//! 1. clamp the frame delta
//! 2. sample the control flags from the device state
//! 3. run the locomotion machine (neutral input while the camera modifier
//!    hands the keys to the free-fly camera)
//! 4. run the camera rig
//! 5. advance the mixer
//! 6. clear the jump edge and per-frame device state
//!
//! Assets are loaded exactly once through an [`AssetLoader`] before the
//! viewer exists. If loading fails the error is logged and returned, and the
//! host never gets a viewer to tick.

use std::sync::Arc;

use glam::{Affine3A, Vec3};

use crate::animation::library::{self, ClipLibrary};
use crate::animation::mixer::{ActionList, AnimationMixer};
use crate::animation::pose::Pose;
use crate::camera::CameraRig;
use crate::character::{Character, CharacterVisual, LocomotionController, MovementState};
use crate::errors::Result;
use crate::input::{Input, InputState};
use crate::scene::{BoundingBox, Transform};
use crate::settings::ViewerSettings;
use crate::utils::time::clamp_delta;

/// Character model as reported by the loader.
#[derive(Debug, Clone)]
pub struct CharacterAsset {
    /// Root transform of the visual, relative to the character origin.
    pub root: Transform,
    /// Unscaled height of the model.
    pub bounding_height: f32,
}

/// Host-side asset loading, called once before the first tick.
pub trait AssetLoader {
    /// Loads the static environment and returns its bounds in model space.
    fn load_environment(&mut self) -> Result<BoundingBox>;

    fn load_character(&mut self) -> Result<CharacterAsset>;
}

/// Placement of the environment and the opening camera shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentFraming {
    /// Translation that centres the environment footprint on the origin and
    /// rests its lowest point on y = 0.
    pub offset: Vec3,
    /// Environment bounds after `offset` is applied.
    pub bounds: BoundingBox,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
}

/// Centres the environment and places the camera so that the whole of it
/// fits a `fov_degrees` vertical field of view, with 50% margin.
#[must_use]
pub fn frame_environment(bounds: &BoundingBox, fov_degrees: f32) -> EnvironmentFraming {
    let center = bounds.center();
    let size = bounds.size();
    let offset = Vec3::new(-center.x, -bounds.min.y, -center.z);

    let half_fov = fov_degrees.to_radians() * 0.5;
    let distance = (bounds.max_dimension() * 0.5 / half_fov.tan()).abs() * 1.5;

    EnvironmentFraming {
        offset,
        bounds: bounds.translated(offset),
        camera_position: Vec3::new(distance * 0.8, distance * 0.5, distance * 0.8),
        camera_target: Vec3::new(0.0, size.y / 3.0, 0.0),
    }
}

/// Everything a renderer needs after a tick.
#[derive(Debug, Clone)]
pub struct ViewerSnapshot {
    pub character: Character,
    pub movement: MovementState,
    /// World transform of the character visual with the blended pose applied.
    pub character_root: Transform,
    /// `character_root` as an object-to-world matrix.
    pub character_matrix: Affine3A,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub camera_free_fly: bool,
    /// Camera-to-world matrix; its inverse is the view matrix.
    pub camera_matrix: Affine3A,
    /// Clip, local time and weight of every enabled action.
    pub actions: ActionList,
    pub pose: Pose,
}

pub struct Viewer {
    settings: ViewerSettings,
    character: Character,
    locomotion: LocomotionController,
    mixer: AnimationMixer,
    camera: CameraRig,
    input: InputState,
    visual: CharacterVisual,
    environment: EnvironmentFraming,
    ticks: u64,
}

impl Viewer {
    /// Loads the assets and builds a viewer with the built-in clips.
    pub fn start(settings: ViewerSettings, loader: &mut impl AssetLoader) -> Result<Self> {
        settings.validate()?;

        let environment = loader
            .load_environment()
            .inspect_err(|err| log::error!("Failed to load environment: {err}"))?;
        let character = loader
            .load_character()
            .inspect_err(|err| log::error!("Failed to load character: {err}"))?;

        Self::with_library(settings, ClipLibrary::builtin()?, environment, character)
    }

    /// Builds a viewer from already loaded assets and a custom clip library.
    pub fn with_library(
        settings: ViewerSettings,
        library: ClipLibrary,
        environment: BoundingBox,
        character_asset: CharacterAsset,
    ) -> Result<Self> {
        settings.validate()?;

        let environment = frame_environment(&environment, settings.camera.fov_degrees);
        log::info!(
            "Environment framed: size {:?}, offset {:?}",
            environment.bounds.size(),
            environment.offset
        );

        let visual = CharacterVisual::fit_to_height(
            character_asset.root,
            character_asset.bounding_height,
            settings.character.target_height,
        )?;

        let mut mixer = AnimationMixer::new(Arc::new(library));
        mixer.request_state(library::IDLE, 0.0, false)?;

        let mut character = Character::new(settings.character.spawn);
        character.position.y = settings.locomotion.physics.ground_y;

        let camera = CameraRig::new(
            environment.camera_position,
            environment.camera_target,
            settings.camera,
        );

        Ok(Self {
            locomotion: LocomotionController::new(settings.locomotion),
            settings,
            character,
            mixer,
            camera,
            input: InputState::default(),
            visual,
            environment,
            ticks: 0,
        })
    }

    /// Advances the whole core by one frame.
    ///
    /// `dt` is clamped to `max_delta`. Key edges and mouse deltas in `raw` are
    /// consumed.
    pub fn tick(&mut self, raw: &mut Input, dt: f32) -> ViewerSnapshot {
        let dt = clamp_delta(dt, self.settings.max_delta);

        self.input.sample(raw, &self.settings.bindings);

        let mut locomotion_input = if self.input.camera_modifier {
            InputState::default()
        } else {
            self.input
        };
        self.locomotion
            .update(&mut self.character, &mut locomotion_input, &mut self.mixer, dt);

        let follow_point =
            self.character.position + Vec3::Y * self.settings.camera.orbit.follow_height;
        self.camera.update(&self.input, raw, follow_point, dt);

        self.mixer.advance(dt);

        self.input.end_tick();
        raw.end_frame();
        self.ticks += 1;

        self.snapshot()
    }

    /// State after the most recent tick.
    pub fn snapshot(&mut self) -> ViewerSnapshot {
        let pose = self.mixer.sample();
        let character_root = self.visual.posed(&self.character, &pose);
        ViewerSnapshot {
            character: self.character,
            movement: self.locomotion.state(),
            character_root,
            character_matrix: character_root.matrix(),
            camera_position: self.camera.position(),
            camera_target: self.camera.target(),
            camera_free_fly: self.camera.is_free_fly(),
            camera_matrix: self.camera.transform().matrix(),
            actions: self.mixer.actions(),
            pose,
        }
    }

    #[must_use]
    pub fn character(&self) -> &Character {
        &self.character
    }

    #[must_use]
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    #[must_use]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    #[must_use]
    pub fn locomotion(&self) -> &LocomotionController {
        &self.locomotion
    }

    #[must_use]
    pub fn visual(&self) -> &CharacterVisual {
        &self.visual
    }

    #[must_use]
    pub fn environment(&self) -> &EnvironmentFraming {
        &self.environment
    }

    #[must_use]
    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
