use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::input::InputState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeFlySettings {
    /// Translation speed in units/s.
    pub speed: f32,
}

impl Default for FreeFlySettings {
    fn default() -> Self {
        Self { speed: 50.0 }
    }
}

/// Camera-relative horizontal basis `(forward, right)`, both unit length or
/// zero when the camera looks straight up or down.
#[must_use]
pub fn horizontal_basis(position: Vec3, target: Vec3) -> (Vec3, Vec3) {
    let mut forward = target - position;
    forward.y = 0.0;
    let forward = forward.normalize_or_zero();
    let right = forward.cross(Vec3::Y).normalize_or_zero();
    (forward, right)
}

/// Translates camera and look target together, returning the new
/// `(position, target)`. The look direction is unchanged.
///
/// Forward/back move along the flattened view direction, turn keys strafe,
/// the jump key raises and the run modifier lowers.
#[must_use]
pub fn fly(
    position: Vec3,
    target: Vec3,
    input: &InputState,
    settings: &FreeFlySettings,
    dt: f32,
) -> (Vec3, Vec3) {
    let distance = settings.speed * dt;
    let (forward, right) = horizontal_basis(position, target);

    let mut offset = Vec3::ZERO;
    if input.forward {
        offset += forward * distance;
    }
    if input.back {
        offset -= forward * distance;
    }
    if input.turn_left {
        offset -= right * distance;
    }
    if input.turn_right {
        offset += right * distance;
    }
    if input.jump_held {
        offset.y += distance;
    }
    if input.run_modifier {
        offset.y -= distance;
    }

    (position + offset, target + offset)
}
