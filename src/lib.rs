#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod camera;
pub mod character;
pub mod errors;
pub mod input;
pub mod scene;
pub mod settings;
pub mod utils;
pub mod viewer;

pub use animation::{AnimationAction, AnimationClip, AnimationMixer, ClipLibrary, LoopMode, Pose};
pub use camera::{CameraMode, CameraRig};
pub use character::{Character, LocomotionController, MovementState};
pub use errors::WayfarerError;
pub use input::{Input, InputState, Key, KeyBindings};
pub use scene::{BoundingBox, Transform};
pub use settings::ViewerSettings;
pub use viewer::{AssetLoader, CharacterAsset, Viewer, ViewerSnapshot};
