//! Utility Module
//!
//! - [`time`]: wall-clock frame timer and delta clamping

pub mod time;

pub use time::{Timer, clamp_delta};
