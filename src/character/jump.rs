//! Jump / vertical integrator.
//!
//! A single-axis semi-implicit Euler stepper: gravity updates the velocity
//! first, then the velocity moves the height. Landing clamps to the ground
//! plane and zeroes the velocity; while grounded the velocity is pinned to
//! zero so that stale launch velocity can never leak into the next tick.

use serde::{Deserialize, Serialize};

use crate::character::Character;

/// The slice of character state the integrator reads and writes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalState {
    pub y: f32,
    pub velocity: f32,
    pub grounded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpPhysics {
    /// Vertical acceleration in units/s², negative pulls down.
    pub gravity: f32,
    /// Upward velocity given at launch, units/s.
    pub jump_velocity: f32,
    /// Height of the ground plane.
    pub ground_y: f32,
}

impl Default for JumpPhysics {
    fn default() -> Self {
        Self {
            gravity: -900.0,
            jump_velocity: 360.0,
            ground_y: 0.0,
        }
    }
}

impl JumpPhysics {
    /// Advances the vertical state by `dt` seconds.
    #[must_use]
    pub fn advance(&self, state: VerticalState, dt: f32) -> VerticalState {
        if state.grounded {
            return VerticalState {
                y: self.ground_y,
                velocity: 0.0,
                grounded: true,
            };
        }

        let velocity = state.velocity + self.gravity * dt;
        let y = state.y + velocity * dt;

        if y <= self.ground_y {
            VerticalState {
                y: self.ground_y,
                velocity: 0.0,
                grounded: true,
            }
        } else {
            VerticalState {
                y,
                velocity,
                grounded: false,
            }
        }
    }

    /// Leaves the ground with the launch velocity. `None` when already airborne.
    #[must_use]
    pub fn launch(&self, state: VerticalState) -> Option<VerticalState> {
        state.grounded.then_some(VerticalState {
            y: state.y,
            velocity: self.jump_velocity,
            grounded: false,
        })
    }

    /// Steps the character in place. Returns `true` on the tick it lands.
    pub fn step(&self, character: &mut Character, dt: f32) -> bool {
        let was_grounded = character.grounded;
        let next = self.advance(character.vertical_state(), dt);
        character.set_vertical_state(next);
        !was_grounded && next.grounded
    }

    /// Ideal time from launch back to the launch height.
    #[must_use]
    pub fn flight_time(&self) -> f32 {
        if self.gravity >= 0.0 {
            return f32::INFINITY;
        }
        2.0 * self.jump_velocity / -self.gravity
    }

    /// Ideal apex height above the launch point.
    #[must_use]
    pub fn apex_height(&self) -> f32 {
        if self.gravity >= 0.0 {
            return f32::INFINITY;
        }
        self.jump_velocity * self.jump_velocity / (2.0 * -self.gravity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounded_state_pins_velocity() {
        let physics = JumpPhysics::default();
        let stale = VerticalState {
            y: 3.0,
            velocity: 120.0,
            grounded: true,
        };
        let next = physics.advance(stale, 1.0 / 60.0);
        assert_eq!(next.velocity, 0.0);
        assert_eq!(next.y, physics.ground_y);
    }

    #[test]
    fn launch_is_refused_midair() {
        let physics = JumpPhysics::default();
        let airborne = VerticalState {
            y: 40.0,
            velocity: 10.0,
            grounded: false,
        };
        assert!(physics.launch(airborne).is_none());
    }

    #[test]
    fn ideal_flight_time() {
        let physics = JumpPhysics::default();
        assert!((physics.flight_time() - 0.8).abs() < 1e-6);
        assert!((physics.apex_height() - 72.0).abs() < 1e-4);
    }
}
