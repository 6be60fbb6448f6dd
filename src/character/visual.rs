use glam::{Quat, Vec3};

use crate::animation::pose::Pose;
use crate::character::Character;
use crate::errors::{Result, WayfarerError};
use crate::scene::transform::Transform;

/// The rendered character root supplied by the asset loader, scaled once so
/// that its bounding height matches the configured target height.
#[derive(Debug, Clone)]
pub struct CharacterVisual {
    rest: Transform,
    height: f32,
}

impl CharacterVisual {
    /// Scales `root` uniformly so a model `bounding_height` tall ends up
    /// `target_height` tall.
    pub fn fit_to_height(root: Transform, bounding_height: f32, target_height: f32) -> Result<Self> {
        if !(bounding_height.is_finite() && bounding_height > 0.0) {
            return Err(WayfarerError::AssetLoad(format!(
                "character bounding height must be positive, got {bounding_height}"
            )));
        }
        if !(target_height.is_finite() && target_height > 0.0) {
            return Err(WayfarerError::InvalidSettings(format!(
                "character target height must be positive, got {target_height}"
            )));
        }

        let factor = target_height / bounding_height;
        let mut rest = root;
        rest.scale *= factor;
        rest.position *= factor;

        log::info!("Character visual scaled by {factor:.4} to height {target_height}");
        Ok(Self {
            rest,
            height: target_height,
        })
    }

    /// Fitted height in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[must_use]
    pub fn rest(&self) -> &Transform {
        &self.rest
    }

    /// World transform of the visual root for the character's current pose.
    #[must_use]
    pub fn posed(&self, character: &Character, pose: &Pose) -> Transform {
        let heading = Quat::from_axis_angle(Vec3::Y, character.yaw);

        let mut placed = self.rest;
        placed.position = character.position + heading * self.rest.position;
        placed.rotation = heading * self.rest.rotation;

        pose.apply_to(&placed, self.height)
    }
}
