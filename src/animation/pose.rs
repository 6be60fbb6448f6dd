use glam::{Quat, Vec3};

use crate::animation::clip::Channel;
use crate::scene::transform::Transform;

/// Blended channel values produced by the mixer for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    values: [f32; Channel::ALL.len()],
}

impl Default for Pose {
    fn default() -> Self {
        Self::rest()
    }
}

impl Pose {
    /// Every channel at its rest value.
    #[must_use]
    pub fn rest() -> Self {
        let mut values = [0.0; Channel::ALL.len()];
        for channel in Channel::ALL {
            values[channel.index()] = channel.rest_value();
        }
        Self { values }
    }

    /// All channels zero; the starting point of a weighted sum.
    #[must_use]
    pub(crate) fn zero() -> Self {
        Self {
            values: [0.0; Channel::ALL.len()],
        }
    }

    #[must_use]
    pub fn get(&self, channel: Channel) -> f32 {
        self.values[channel.index()]
    }

    pub(crate) fn accumulate(&mut self, channel: Channel, value: f32, weight: f32) {
        self.values[channel.index()] += value * weight;
    }

    /// Layers the pose on top of a rest transform.
    ///
    /// `height` converts the normalized vertical offset into world units.
    #[must_use]
    pub fn apply_to(&self, rest: &Transform, height: f32) -> Transform {
        let mut out = *rest;
        out.position += Vec3::Y * self.get(Channel::OffsetY) * height;
        out.rotation = rest.rotation * Quat::from_rotation_x(self.get(Channel::Lean));
        out.scale = rest.scale
            * Vec3::new(
                self.get(Channel::ScaleX),
                self.get(Channel::ScaleY),
                self.get(Channel::ScaleZ),
            );
        out
    }
}
