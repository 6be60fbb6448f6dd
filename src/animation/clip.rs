use serde::{Deserialize, Serialize};

use crate::animation::action::LoopMode;
use crate::animation::tracks::KeyframeTrack;

/// Output channel driven by a procedural track.
///
/// Offsets are expressed as a fraction of the character's fitted height so
/// that the same clip reads correctly whatever size the visual ends up at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Vertical bob of the visual root.
    OffsetY,
    /// Forward lean, radians about the local X axis.
    Lean,
    ScaleX,
    ScaleY,
    ScaleZ,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::OffsetY,
        Channel::Lean,
        Channel::ScaleX,
        Channel::ScaleY,
        Channel::ScaleZ,
    ];

    /// Value of the channel when no clip drives it.
    #[must_use]
    pub fn rest_value(self) -> f32 {
        match self {
            Channel::OffsetY | Channel::Lean => 0.0,
            Channel::ScaleX | Channel::ScaleY | Channel::ScaleZ => 1.0,
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Channel::OffsetY => 0,
            Channel::Lean => 1,
            Channel::ScaleX => 2,
            Channel::ScaleY => 3,
            Channel::ScaleZ => 4,
        }
    }
}

/// One keyframe track bound to its output channel.
#[derive(Debug, Clone)]
pub struct ChannelTrack {
    pub channel: Channel,
    pub track: KeyframeTrack<f32>,
}

#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    pub loop_mode: LoopMode,
    pub tracks: Vec<ChannelTrack>,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, loop_mode: LoopMode, tracks: Vec<ChannelTrack>) -> Self {
        let duration = tracks
            .iter()
            .map(|t| t.track.end_time())
            .fold(0.0_f32, f32::max);

        Self {
            name: name.into(),
            duration,
            loop_mode,
            tracks,
        }
    }

    #[must_use]
    pub fn track(&self, channel: Channel) -> Option<&KeyframeTrack<f32>> {
        self.tracks
            .iter()
            .find(|t| t.channel == channel)
            .map(|t| &t.track)
    }

    /// Maps a local time into the clip's playable range according to its
    /// loop policy.
    #[must_use]
    pub fn wrap_time(&self, time: f32) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        match self.loop_mode {
            LoopMode::Repeat => time.rem_euclid(self.duration),
            LoopMode::Once => time.clamp(0.0, self.duration),
        }
    }

    /// Samples `channel` at `time`. Repeating clips wrap modulo the duration,
    /// play-once clips hold their last value. Channels the clip does not
    /// animate read as their rest value.
    #[must_use]
    pub fn sample_channel(&self, channel: Channel, time: f32) -> f32 {
        let t = self.wrap_time(time);
        self.track(channel)
            .and_then(|track| track.sample(t))
            .unwrap_or_else(|| channel.rest_value())
    }
}
