//! Viewer Settings
//!
//! Every tunable of the core lives in one plain struct tree with sensible
//! defaults. Hosts override individual values with struct-update syntax, or
//! load a partial JSON document where missing fields keep their defaults.
//!
//! # Example
//!
//! ```rust,ignore
//! use wayfarer::settings::ViewerSettings;
//! use wayfarer::character::LocomotionSettings;
//!
//! // Faster character, everything else default
//! let settings = ViewerSettings {
//!     locomotion: LocomotionSettings {
//!         walk_speed: 300.0,
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//!
//! // Same thing from JSON
//! let settings = ViewerSettings::from_json_str(r#"{ "locomotion": { "walk_speed": 300.0 } }"#)?;
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::CameraSettings;
use crate::character::LocomotionSettings;
use crate::errors::{Result, WayfarerError};
use crate::input::KeyBindings;
use crate::utils::time::DEFAULT_MAX_DELTA;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterSettings {
    /// Where the character starts.
    pub spawn: Vec3,
    /// Height the character visual is scaled to, in world units.
    pub target_height: f32,
}

impl Default for CharacterSettings {
    fn default() -> Self {
        Self {
            spawn: Vec3::ZERO,
            target_height: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub locomotion: LocomotionSettings,
    pub camera: CameraSettings,
    pub character: CharacterSettings,
    pub bindings: KeyBindings,
    /// Largest frame delta integrated in one tick, seconds.
    pub max_delta: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            locomotion: LocomotionSettings::default(),
            camera: CameraSettings::default(),
            character: CharacterSettings::default(),
            bindings: KeyBindings::default(),
            max_delta: DEFAULT_MAX_DELTA,
        }
    }
}

impl ViewerSettings {
    /// Parses and validates settings from JSON. Missing fields keep defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<()> {
        self.locomotion.validate()?;

        let orbit = &self.camera.orbit;
        if orbit.min_distance.is_nan() || orbit.min_distance < 0.0 || orbit.max_distance < orbit.min_distance {
            return Err(WayfarerError::InvalidSettings(
                "orbit distances must satisfy 0 <= min_distance <= max_distance".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&orbit.damping_factor) {
            return Err(WayfarerError::InvalidSettings(
                "orbit damping_factor must be within [0, 1]".to_string(),
            ));
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return Err(WayfarerError::InvalidSettings(
                "camera fov_degrees must be within (0, 180)".to_string(),
            ));
        }
        if self.character.target_height.is_nan() || self.character.target_height <= 0.0 {
            return Err(WayfarerError::InvalidSettings(
                "character target_height must be positive".to_string(),
            ));
        }
        if self.max_delta.is_nan() || self.max_delta <= 0.0 {
            return Err(WayfarerError::InvalidSettings(
                "max_delta must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
