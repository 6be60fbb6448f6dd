//! Character state and the systems that move it.
//!
//! - [`Character`]: position, heading and vertical state
//! - [`jump`]: gravity / launch / ground clamp integrator
//! - [`locomotion`]: input-driven movement and animation state selection
//! - [`visual`]: the rendered root the animation channels are layered onto

pub mod jump;
pub mod locomotion;
pub mod visual;

use glam::Vec3;

pub use jump::{JumpPhysics, VerticalState};
pub use locomotion::{LocomotionController, LocomotionSettings, MovementState};
pub use visual::CharacterVisual;

/// The controllable character.
///
/// Mutated once per tick by the locomotion controller. `vertical_velocity` is
/// always zero while `grounded` holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Character {
    pub position: Vec3,
    /// Heading about +Y in radians, kept in `[0, 2π)`. Zero faces +Z.
    pub yaw: f32,
    pub grounded: bool,
    pub vertical_velocity: f32,
}

impl Character {
    /// A grounded character at `position`, facing +Z.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            grounded: true,
            vertical_velocity: 0.0,
        }
    }

    /// Unit forward axis derived from the yaw, always horizontal.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        let (sin, cos) = self.yaw.sin_cos();
        Vec3::new(sin, 0.0, cos)
    }

    #[must_use]
    pub fn vertical_state(&self) -> VerticalState {
        VerticalState {
            y: self.position.y,
            velocity: self.vertical_velocity,
            grounded: self.grounded,
        }
    }

    pub fn set_vertical_state(&mut self, state: VerticalState) {
        self.position.y = state.y;
        self.vertical_velocity = state.velocity;
        self.grounded = state.grounded;
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
