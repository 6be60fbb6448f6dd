//! Locomotion state machine.
//!
//! Each tick turns the control flags into a heading change, a displacement
//! along the heading, an optional jump launch, one step of the vertical
//! integrator, and finally an animation state request.
//!
//! Running is coupled to turning: the character moves at `run_speed` only
//! while a movement key *and* a turn key are held together. The run modifier
//! key plays no part in ground speed.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::animation::library;
use crate::animation::mixer::AnimationMixer;
use crate::character::Character;
use crate::character::jump::JumpPhysics;
use crate::errors::{Result, WayfarerError};
use crate::input::InputState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementState {
    Idle,
    Walk,
    Run,
    Jump,
}

impl MovementState {
    /// Library clip that animates this state.
    #[must_use]
    pub fn clip_name(self) -> &'static str {
        match self {
            MovementState::Idle => library::IDLE,
            MovementState::Walk => library::WALK,
            MovementState::Run => library::RUN,
            MovementState::Jump => library::JUMP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionSettings {
    /// Ground speed without turn input, units/s.
    pub walk_speed: f32,
    /// Ground speed while moving and turning, units/s.
    pub run_speed: f32,
    /// Heading change per second of turn input, radians.
    pub turn_rate: f32,
    /// Crossfade used between Idle, Walk and Run.
    pub move_fade: f32,
    /// Crossfade into the Jump clip.
    pub jump_fade: f32,
    pub physics: JumpPhysics,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            walk_speed: 220.0,
            run_speed: 480.0,
            turn_rate: 2.5,
            move_fade: 0.2,
            jump_fade: 0.05,
            physics: JumpPhysics::default(),
        }
    }
}

impl LocomotionSettings {
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(WayfarerError::InvalidSettings(msg.to_string()));

        if self.walk_speed.is_nan() || self.walk_speed < 0.0 {
            return invalid("walk_speed must be non-negative");
        }
        if self.run_speed.is_nan() || self.run_speed < 0.0 {
            return invalid("run_speed must be non-negative");
        }
        if !self.turn_rate.is_finite() {
            return invalid("turn_rate must be finite");
        }
        if self.move_fade.is_nan() || self.move_fade < 0.0 {
            return invalid("move_fade must be non-negative");
        }
        if self.jump_fade.is_nan() || self.jump_fade < 0.0 {
            return invalid("jump_fade must be non-negative");
        }
        if self.physics.gravity.is_nan() || self.physics.gravity >= 0.0 {
            return invalid("gravity must be negative");
        }
        if self.physics.jump_velocity.is_nan() || self.physics.jump_velocity <= 0.0 {
            return invalid("jump_velocity must be positive");
        }
        Ok(())
    }
}

/// Drives the character from the control flags and picks its animation.
#[derive(Debug, Clone)]
pub struct LocomotionController {
    pub settings: LocomotionSettings,
    jump_animating: bool,
    state: MovementState,
}

impl LocomotionController {
    #[must_use]
    pub fn new(settings: LocomotionSettings) -> Self {
        Self {
            settings,
            jump_animating: false,
            state: MovementState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> MovementState {
        self.state
    }

    #[must_use]
    pub fn is_jump_animating(&self) -> bool {
        self.jump_animating
    }

    /// Runs one tick. The jump request in `input` is consumed whether or not
    /// the character was able to jump.
    pub fn update(
        &mut self,
        character: &mut Character,
        input: &mut InputState,
        mixer: &mut AnimationMixer,
        dt: f32,
    ) {
        let settings = self.settings;

        let turn = input.turn_intent() * settings.turn_rate * dt;
        character.yaw = (character.yaw + turn).rem_euclid(TAU);

        let move_intent = input.move_intent();
        let moving = move_intent != 0.0;
        let running = moving && input.is_turning();
        if moving {
            let speed = if running {
                settings.run_speed
            } else {
                settings.walk_speed
            };
            character.position += character.forward() * (move_intent * speed * dt);
        }

        if input.take_jump_request() {
            if let Some(launched) = settings.physics.launch(character.vertical_state()) {
                character.set_vertical_state(launched);
                self.jump_animating = true;
                self.state = MovementState::Jump;
                log::debug!("Jump launched at y={:.2}", character.position.y);
                Self::request(mixer, MovementState::Jump, settings.jump_fade, true);
            }
        }

        if settings.physics.step(character, dt) {
            log::debug!(
                "Landed at ({:.1}, {:.1})",
                character.position.x,
                character.position.z
            );
        }

        if self.jump_animating {
            if !mixer.is_jump_animation_finished() {
                return;
            }
            self.jump_animating = false;
        }

        let next = if running {
            MovementState::Run
        } else if moving {
            MovementState::Walk
        } else {
            MovementState::Idle
        };
        if next != self.state {
            log::debug!("Movement state {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        Self::request(mixer, next, settings.move_fade, false);
    }

    fn request(mixer: &mut AnimationMixer, state: MovementState, fade: f32, force_restart: bool) {
        if let Err(err) = mixer.request_state(state.clip_name(), fade, force_restart) {
            log::error!("Cannot animate {state:?}: {err}");
        }
    }
}
