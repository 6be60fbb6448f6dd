//! Procedural Animation Library
//!
//! Holds the named clips the mixer can play. Every clip is described by a
//! small data table of `(channel, times, values)` rows and turned into an
//! immutable [`AnimationClip`] once, at construction time. After that the
//! library is only read, shared with the mixer behind an `Arc`.
//!
//! The four built-in clips drive the character's visual root directly:
//!
//! | Clip  | Loop   | Channels                         |
//! |-------|--------|----------------------------------|
//! | Idle  | Repeat | subtle bob, lean                 |
//! | Walk  | Repeat | bob, lean (slower cadence)       |
//! | Run   | Repeat | larger bob, lean (faster cadence)|
//! | Jump  | Once   | squash/stretch scale, bob        |
//!
//! Additional clips can be registered from JSON using the same table layout.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::animation::action::LoopMode;
use crate::animation::clip::{AnimationClip, Channel, ChannelTrack};
use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
use crate::errors::{Result, WayfarerError};

pub const IDLE: &str = "Idle";
pub const WALK: &str = "Walk";
pub const RUN: &str = "Run";
pub const JUMP: &str = "Jump";

/// One row of a clip table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDesc {
    pub channel: Channel,
    pub times: Vec<f32>,
    pub values: Vec<f32>,
}

/// Data-table description of a clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipDesc {
    pub name: String,
    #[serde(default)]
    pub loop_mode: LoopMode,
    #[serde(default)]
    pub interpolation: InterpolationMode,
    pub channels: Vec<ChannelDesc>,
}

struct BuiltinClip {
    name: &'static str,
    loop_mode: LoopMode,
    channels: &'static [(Channel, &'static [f32], &'static [f32])],
}

const BUILTIN_CLIPS: &[BuiltinClip] = &[
    BuiltinClip {
        name: IDLE,
        loop_mode: LoopMode::Repeat,
        channels: &[
            (Channel::OffsetY, &[0.0, 1.0, 2.0], &[0.0, 0.012, 0.0]),
            (Channel::Lean, &[0.0, 1.0, 2.0], &[0.0, 0.02, 0.0]),
        ],
    },
    BuiltinClip {
        name: WALK,
        loop_mode: LoopMode::Repeat,
        channels: &[
            (
                Channel::OffsetY,
                &[0.0, 0.25, 0.5, 0.75, 1.0],
                &[0.0, 0.04, 0.0, 0.04, 0.0],
            ),
            (
                Channel::Lean,
                &[0.0, 0.25, 0.5, 0.75, 1.0],
                &[0.06, 0.08, 0.06, 0.08, 0.06],
            ),
        ],
    },
    BuiltinClip {
        name: RUN,
        loop_mode: LoopMode::Repeat,
        channels: &[
            (
                Channel::OffsetY,
                &[0.0, 0.15, 0.3, 0.45, 0.6],
                &[0.0, 0.08, 0.0, 0.08, 0.0],
            ),
            (
                Channel::Lean,
                &[0.0, 0.15, 0.3, 0.45, 0.6],
                &[0.18, 0.22, 0.18, 0.22, 0.18],
            ),
        ],
    },
    BuiltinClip {
        name: JUMP,
        loop_mode: LoopMode::Once,
        channels: &[
            (
                Channel::ScaleX,
                &[0.0, 0.1, 0.25, 0.55, 0.7, 0.8],
                &[1.0, 1.15, 0.9, 0.97, 1.1, 1.0],
            ),
            (
                Channel::ScaleY,
                &[0.0, 0.1, 0.25, 0.55, 0.7, 0.8],
                &[1.0, 0.75, 1.2, 1.05, 0.85, 1.0],
            ),
            (
                Channel::ScaleZ,
                &[0.0, 0.1, 0.25, 0.55, 0.7, 0.8],
                &[1.0, 1.15, 0.9, 0.97, 1.1, 1.0],
            ),
            (
                Channel::OffsetY,
                &[0.0, 0.1, 0.25, 0.55, 0.7, 0.8],
                &[0.0, -0.04, 0.06, 0.04, -0.03, 0.0],
            ),
        ],
    },
];

impl BuiltinClip {
    fn to_desc(&self) -> ClipDesc {
        ClipDesc {
            name: self.name.to_string(),
            loop_mode: self.loop_mode,
            interpolation: InterpolationMode::Linear,
            channels: self
                .channels
                .iter()
                .map(|(channel, times, values)| ChannelDesc {
                    channel: *channel,
                    times: times.to_vec(),
                    values: values.to_vec(),
                })
                .collect(),
        }
    }
}

/// Registry of immutable clips, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ClipLibrary {
    clips: FxHashMap<String, Arc<AnimationClip>>,
}

impl ClipLibrary {
    /// An empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A library holding the Idle, Walk, Run and Jump clips.
    pub fn builtin() -> Result<Self> {
        let mut library = Self::new();
        for clip in BUILTIN_CLIPS {
            library.register(clip.to_desc())?;
        }
        Ok(library)
    }

    /// Builds and stores a clip from its table description.
    ///
    /// Rejects clips without tracks, tracks without keyframes, mismatched
    /// time/value arrays, unsorted timestamps and duplicate names.
    pub fn register(&mut self, desc: ClipDesc) -> Result<()> {
        let invalid = |reason: String| WayfarerError::InvalidClip {
            name: desc.name.clone(),
            reason,
        };

        if desc.channels.is_empty() {
            return Err(invalid("clip has no channel tracks".to_string()));
        }
        if self.clips.contains_key(&desc.name) {
            return Err(invalid("a clip with this name is already registered".to_string()));
        }

        let mut tracks = Vec::with_capacity(desc.channels.len());
        for row in &desc.channels {
            if tracks.iter().any(|t: &ChannelTrack| t.channel == row.channel) {
                return Err(invalid(format!("channel {:?} is defined twice", row.channel)));
            }
            let track = KeyframeTrack::new(row.times.clone(), row.values.clone(), desc.interpolation);
            track
                .validate()
                .map_err(|reason| invalid(format!("{:?}: {reason}", row.channel)))?;
            tracks.push(ChannelTrack {
                channel: row.channel,
                track,
            });
        }

        let clip = AnimationClip::new(desc.name.clone(), desc.loop_mode, tracks);
        log::debug!(
            "Registered clip '{}' ({:.2}s, {:?})",
            clip.name,
            clip.duration,
            clip.loop_mode
        );
        self.clips.insert(desc.name, Arc::new(clip));
        Ok(())
    }

    /// Registers every clip in a JSON array of [`ClipDesc`] tables.
    ///
    /// Clips before a rejected entry stay registered.
    pub fn register_json(&mut self, json: &str) -> Result<()> {
        let descs: Vec<ClipDesc> = serde_json::from_str(json)?;
        for desc in descs {
            self.register(desc)?;
        }
        Ok(())
    }

    pub fn get_clip(&self, name: &str) -> Result<Arc<AnimationClip>> {
        self.clips
            .get(name)
            .cloned()
            .ok_or_else(|| WayfarerError::UnknownClip(name.to_string()))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_valid() {
        let library = ClipLibrary::builtin().unwrap();
        assert_eq!(library.len(), BUILTIN_CLIPS.len());
        for clip in BUILTIN_CLIPS {
            assert!(library.contains(clip.name));
        }
    }

    #[test]
    fn run_cadence_is_faster_than_walk() {
        let library = ClipLibrary::builtin().unwrap();
        let walk = library.get_clip(WALK).unwrap();
        let run = library.get_clip(RUN).unwrap();
        assert!(run.duration < walk.duration);
    }
}
