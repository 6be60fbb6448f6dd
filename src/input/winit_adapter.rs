//! winit → [`Input`] bridge
//!
//! Only keys in the rebinding surface ([`Key`]) are forwarded. Everything
//! else a keyboard can produce is dropped here so bindings never see it.

use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::device::{ButtonState, Input, Key, MouseButton};

/// Scroll units per pixel for touchpads that report pixel deltas.
const PIXELS_PER_LINE: f32 = 100.0;

const KEY_TABLE: &[(KeyCode, Key)] = &[
    (KeyCode::KeyA, Key::A),
    (KeyCode::KeyB, Key::B),
    (KeyCode::KeyC, Key::C),
    (KeyCode::KeyD, Key::D),
    (KeyCode::KeyE, Key::E),
    (KeyCode::KeyF, Key::F),
    (KeyCode::KeyG, Key::G),
    (KeyCode::KeyH, Key::H),
    (KeyCode::KeyI, Key::I),
    (KeyCode::KeyJ, Key::J),
    (KeyCode::KeyK, Key::K),
    (KeyCode::KeyL, Key::L),
    (KeyCode::KeyM, Key::M),
    (KeyCode::KeyN, Key::N),
    (KeyCode::KeyO, Key::O),
    (KeyCode::KeyP, Key::P),
    (KeyCode::KeyQ, Key::Q),
    (KeyCode::KeyR, Key::R),
    (KeyCode::KeyS, Key::S),
    (KeyCode::KeyT, Key::T),
    (KeyCode::KeyU, Key::U),
    (KeyCode::KeyV, Key::V),
    (KeyCode::KeyW, Key::W),
    (KeyCode::KeyX, Key::X),
    (KeyCode::KeyY, Key::Y),
    (KeyCode::KeyZ, Key::Z),
    (KeyCode::ArrowUp, Key::ArrowUp),
    (KeyCode::ArrowDown, Key::ArrowDown),
    (KeyCode::ArrowLeft, Key::ArrowLeft),
    (KeyCode::ArrowRight, Key::ArrowRight),
    (KeyCode::Space, Key::Space),
    (KeyCode::ShiftLeft, Key::ShiftLeft),
    (KeyCode::ShiftRight, Key::ShiftRight),
    (KeyCode::ControlLeft, Key::ControlLeft),
    (KeyCode::ControlRight, Key::ControlRight),
];

/// The bindable [`Key`] for a physical key, if any.
#[must_use]
pub fn bindable_key(physical_key: PhysicalKey) -> Option<Key> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };
    KEY_TABLE
        .iter()
        .find_map(|&(table_code, key)| (table_code == code).then_some(key))
}

fn button(button: winit::event::MouseButton) -> MouseButton {
    use winit::event::MouseButton as Winit;
    match button {
        Winit::Left => MouseButton::Left,
        Winit::Right => MouseButton::Right,
        Winit::Middle => MouseButton::Middle,
        Winit::Back => MouseButton::Other(3),
        Winit::Forward => MouseButton::Other(4),
        Winit::Other(id) => MouseButton::Other(id),
    }
}

fn button_state(state: ElementState) -> ButtonState {
    if state.is_pressed() {
        ButtonState::Pressed
    } else {
        ButtonState::Released
    }
}

/// Writes one window event into `input`.
pub fn feed_window_event(input: &mut Input, event: &WindowEvent) {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            let Some(key) = bindable_key(event.physical_key) else {
                return;
            };
            if event.repeat {
                input.inject_key_repeat(key);
            } else {
                input.inject_key(key, button_state(event.state));
            }
        }
        WindowEvent::CursorMoved { position, .. } => {
            input.inject_mouse_position(position.x as f32, position.y as f32);
        }
        WindowEvent::CursorLeft { .. } => input.release_cursor(),
        WindowEvent::MouseInput { state, button: b, .. } => {
            input.inject_mouse_button(button(*b), button_state(*state));
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let lines = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(p) => (
                    p.x as f32 / PIXELS_PER_LINE,
                    p.y as f32 / PIXELS_PER_LINE,
                ),
            };
            input.inject_scroll(lines.0, lines.1);
        }
        WindowEvent::Resized(size) => input.inject_resize(size.width, size.height),
        _ => {}
    }
}
