//! Input Module
//!
//! - [`Input`]: raw device state fed by the host (keys, mouse, scroll)
//! - [`KeyBindings`]: which keys drive which control
//! - [`InputState`]: the per-tick control flags the locomotion machine and
//!   camera rig consume
//!
//! With the `winit` feature, [`winit_adapter`] translates winit window events
//! into [`Input`].

pub mod device;
pub mod state;
#[cfg(feature = "winit")]
pub mod winit_adapter;

pub use device::{ButtonState, Input, Key, KeyTransition, MouseButton};
pub use state::{InputState, KeyBindings};
