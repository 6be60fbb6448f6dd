//! Raw device state
//!
//! [`Input`] is what a host writes window events into and what the core reads
//! once per tick. It knows nothing about a windowing library; the winit
//! adapter behind the `winit` feature is one producer among others.
//!
//! Two rules live here rather than in the adapters:
//!
//! - A key press only counts as an edge when the key was not already held.
//!   Auto-repeat presses, whether flagged by the platform or not, never raise
//!   a second edge.
//! - Edges and pointer deltas accumulate between [`Input::end_frame`] calls,
//!   so several events inside one frame are never lost.

use glam::Vec2;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Keys that a [`KeyBindings`](crate::input::KeyBindings) table may name.
///
/// This is the rebinding surface: every letter, the arrows, Space, and the
/// left/right Shift and Control keys. Keys outside this set are dropped by
/// the adapters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Space,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// What a key event did to the held set.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyTransition {
    /// The key went down this event.
    Pressed,
    /// The key was already down; nothing changed.
    Repeated,
    /// The key went up.
    Released,
    /// A release for a key that was not held.
    Ignored,
}

/// Held keys and buttons, key-down edges and pointer motion for one frame.
#[derive(Debug, Clone, Default)]
pub struct Input {
    held: FxHashSet<Key>,
    pressed_edges: FxHashSet<Key>,
    buttons: FxHashSet<MouseButton>,

    // `None` until the first cursor sample arrives.
    cursor: Option<Vec2>,
    pointer_delta: Vec2,
    scroll: Vec2,

    viewport: Vec2,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Producer side ==========

    /// Applies a key event and reports how it changed the held set.
    pub fn inject_key(&mut self, key: Key, state: ButtonState) -> KeyTransition {
        match state {
            ButtonState::Pressed if self.held.insert(key) => {
                self.pressed_edges.insert(key);
                KeyTransition::Pressed
            }
            ButtonState::Pressed => KeyTransition::Repeated,
            ButtonState::Released if self.held.remove(&key) => KeyTransition::Released,
            ButtonState::Released => KeyTransition::Ignored,
        }
    }

    /// Applies a key event that the platform flagged as auto-repeat.
    ///
    /// Repeats never change the held set, so a repeat that arrives after its
    /// release (some platforms reorder them) cannot resurrect the key.
    pub fn inject_key_repeat(&mut self, key: Key) -> KeyTransition {
        if self.held.contains(&key) {
            KeyTransition::Repeated
        } else {
            KeyTransition::Ignored
        }
    }

    pub fn inject_mouse_button(&mut self, button: MouseButton, state: ButtonState) {
        match state {
            ButtonState::Pressed => self.buttons.insert(button),
            ButtonState::Released => self.buttons.remove(&button),
        };
    }

    /// Records an absolute cursor position. The first sample only seeds the
    /// position; later samples add to the frame's pointer delta.
    pub fn inject_mouse_position(&mut self, x: f32, y: f32) {
        let position = Vec2::new(x, y);
        if let Some(previous) = self.cursor.replace(position) {
            self.pointer_delta += position - previous;
        }
    }

    /// Adds relative pointer motion, for hosts that report deltas directly.
    pub fn inject_mouse_motion(&mut self, dx: f32, dy: f32) {
        self.pointer_delta += Vec2::new(dx, dy);
    }

    /// Forgets the cursor position, e.g. when it leaves the window, so the
    /// next sample does not register as a jump across the screen.
    pub fn release_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn inject_scroll(&mut self, dx: f32, dy: f32) {
        self.scroll += Vec2::new(dx, dy);
    }

    pub fn inject_resize(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width as f32, height as f32);
    }

    /// Drops this frame's edges and deltas. Held state carries over.
    pub fn end_frame(&mut self) {
        self.pressed_edges.clear();
        self.pointer_delta = Vec2::ZERO;
        self.scroll = Vec2::ZERO;
    }

    // ========== Consumer side ==========

    #[must_use]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// True when `key` went down since the last [`Input::end_frame`].
    #[must_use]
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed_edges.contains(&key)
    }

    #[must_use]
    pub fn is_button_held(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    #[must_use]
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_delta
    }

    #[must_use]
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll
    }

    /// Viewport size in pixels; zero until the host reports a resize.
    #[must_use]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_press_is_a_repeat_not_an_edge() {
        let mut input = Input::new();
        assert_eq!(input.inject_key(Key::Space, ButtonState::Pressed), KeyTransition::Pressed);
        input.end_frame();

        assert_eq!(input.inject_key(Key::Space, ButtonState::Pressed), KeyTransition::Repeated);
        assert!(input.is_held(Key::Space));
        assert!(!input.was_pressed(Key::Space));
    }

    #[test]
    fn flagged_repeat_after_release_is_ignored() {
        let mut input = Input::new();
        input.inject_key(Key::W, ButtonState::Pressed);
        input.inject_key(Key::W, ButtonState::Released);

        assert_eq!(input.inject_key_repeat(Key::W), KeyTransition::Ignored);
        assert!(!input.is_held(Key::W));
    }

    #[test]
    fn press_and_release_inside_one_frame_keeps_the_edge() {
        let mut input = Input::new();
        input.inject_key(Key::Space, ButtonState::Pressed);
        input.inject_key(Key::Space, ButtonState::Released);

        assert!(input.was_pressed(Key::Space));
        assert!(!input.is_held(Key::Space));

        input.end_frame();
        assert!(!input.was_pressed(Key::Space));
    }

    #[test]
    fn first_cursor_sample_seeds_without_delta() {
        let mut input = Input::new();
        input.inject_mouse_position(0.0, 0.0);
        assert_eq!(input.pointer_delta(), Vec2::ZERO);

        // A cursor resting on the origin still produces motion afterwards.
        input.inject_mouse_position(12.0, -4.0);
        assert_eq!(input.pointer_delta(), Vec2::new(12.0, -4.0));

        input.end_frame();
        input.release_cursor();
        input.inject_mouse_position(500.0, 500.0);
        assert_eq!(input.pointer_delta(), Vec2::ZERO);
    }
}
