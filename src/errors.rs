//! Error Types
//!
//! This module defines the error types used throughout the locomotion core.
//!
//! # Overview
//!
//! The main error type [`WayfarerError`] covers every failure mode:
//! - Animation clip lookup and registration errors
//! - Settings validation and parsing errors
//! - Asset loading errors reported by the host's loader
//!
//! None of these are fatal to the tick loop. The mixer recovers from clip
//! errors by falling back to the idle clip, and loader errors simply keep the
//! viewer from being constructed.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, WayfarerError>`.
//!
//! ```rust,ignore
//! use wayfarer::errors::{WayfarerError, Result};
//!
//! fn find_clip(library: &ClipLibrary) -> Result<()> {
//!     let _walk = library.get_clip("Walk")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the locomotion core.
#[derive(Error, Debug)]
pub enum WayfarerError {
    // ========================================================================
    // Animation Errors
    // ========================================================================
    /// No clip is registered under the requested name.
    #[error("Unknown animation clip: {0}")]
    UnknownClip(String),

    /// A clip definition was rejected at registration time.
    #[error("Invalid animation clip '{name}': {reason}")]
    InvalidClip {
        /// Name of the rejected clip
        name: String,
        /// What was wrong with its keyframe data
        reason: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A settings value is out of its accepted range.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The host's asset loader failed to provide the environment or character.
    #[error("Asset load failed: {0}")]
    AssetLoad(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Alias for `Result<T, WayfarerError>`.
pub type Result<T> = std::result::Result<T, WayfarerError>;
