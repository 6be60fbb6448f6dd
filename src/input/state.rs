use serde::{Deserialize, Serialize};

use crate::input::device::{Input, Key};

/// Maps physical keys to locomotion and camera flags.
///
/// Each action accepts any of several keys so that, for example, both shift
/// keys act as the run modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: Vec<Key>,
    pub back: Vec<Key>,
    pub turn_left: Vec<Key>,
    pub turn_right: Vec<Key>,
    /// Jump while walking, raise the camera in free-fly.
    pub jump: Vec<Key>,
    /// Lower the camera in free-fly.
    pub run_modifier: Vec<Key>,
    /// Held to hand the movement keys to the free-fly camera.
    pub camera_modifier: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: vec![Key::W, Key::ArrowUp],
            back: vec![Key::S, Key::ArrowDown],
            turn_left: vec![Key::A, Key::ArrowLeft],
            turn_right: vec![Key::D, Key::ArrowRight],
            jump: vec![Key::Space],
            run_modifier: vec![Key::ShiftLeft, Key::ShiftRight],
            camera_modifier: vec![Key::ControlLeft, Key::ControlRight],
        }
    }
}

fn any_held(input: &Input, keys: &[Key]) -> bool {
    keys.iter().any(|&k| input.is_held(k))
}

fn any_pressed(input: &Input, keys: &[Key]) -> bool {
    keys.iter().any(|&k| input.was_pressed(k))
}

/// Per-tick view of the controls.
///
/// Every field except `jump_requested` mirrors whether its keys are held.
/// `jump_requested` is raised once per key-down edge of the jump key (never
/// while the camera modifier is held) and cleared at the end of every tick,
/// whether or not a jump was launched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub run_modifier: bool,
    pub camera_modifier: bool,
    pub jump_held: bool,
    pub jump_requested: bool,
}

impl InputState {
    /// Refreshes the flags from the device state.
    pub fn sample(&mut self, input: &Input, bindings: &KeyBindings) {
        self.forward = any_held(input, &bindings.forward);
        self.back = any_held(input, &bindings.back);
        self.turn_left = any_held(input, &bindings.turn_left);
        self.turn_right = any_held(input, &bindings.turn_right);
        self.run_modifier = any_held(input, &bindings.run_modifier);
        self.camera_modifier = any_held(input, &bindings.camera_modifier);
        self.jump_held = any_held(input, &bindings.jump);

        if !self.camera_modifier && any_pressed(input, &bindings.jump) {
            self.jump_requested = true;
        }
    }

    /// Returns the pending jump request and clears it.
    pub fn take_jump_request(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    pub fn end_tick(&mut self) {
        self.jump_requested = false;
    }

    /// `+1` forward, `-1` back, `0` for neither or both.
    #[must_use]
    pub fn move_intent(&self) -> f32 {
        f32::from(u8::from(self.forward)) - f32::from(u8::from(self.back))
    }

    /// `+1` left, `-1` right, `0` for neither or both.
    #[must_use]
    pub fn turn_intent(&self) -> f32 {
        f32::from(u8::from(self.turn_left)) - f32::from(u8::from(self.turn_right))
    }

    #[must_use]
    pub fn is_turning(&self) -> bool {
        self.turn_left || self.turn_right
    }
}
