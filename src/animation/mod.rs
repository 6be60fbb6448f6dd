pub mod values;
pub mod tracks;
pub mod clip;
pub mod action;
pub mod library;
pub mod mixer;
pub mod pose;

pub use clip::{AnimationClip, Channel, ChannelTrack};
pub use action::{AnimationAction, LoopMode};
pub use library::{ChannelDesc, ClipLibrary, ClipDesc};
pub use mixer::{ActionList, ActionSnapshot, AnimationMixer};
pub use pose::Pose;
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
