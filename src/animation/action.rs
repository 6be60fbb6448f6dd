use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::{
    clip::{AnimationClip, Channel},
    tracks::KeyframeCursor,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoopMode {
    /// Wrap local time modulo the clip duration.
    #[default]
    Repeat,
    /// Play to the end, then hold the final frame and report finished.
    Once,
}

/// Playback state of one clip inside the mixer.
#[derive(Debug, Clone)]
pub struct AnimationAction {
    clip: Arc<AnimationClip>,

    pub time: f32,
    pub time_scale: f32,
    pub weight: f32,
    pub loop_mode: LoopMode,
    pub enabled: bool,

    finished: bool,
    track_cursors: Vec<KeyframeCursor>,
}

impl AnimationAction {
    #[must_use]
    pub fn new(clip: Arc<AnimationClip>) -> Self {
        let track_count = clip.tracks.len();
        let loop_mode = clip.loop_mode;
        Self {
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 0.0,
            loop_mode,
            enabled: false,
            finished: false,
            track_cursors: vec![KeyframeCursor::default(); track_count],
        }
    }

    #[must_use]
    pub fn clip(&self) -> &Arc<AnimationClip> {
        &self.clip
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.clip.name
    }

    /// True once a play-once action has reached the end of its clip.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Rewinds to the first frame and clears the finished condition.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.finished = false;
        for cursor in &mut self.track_cursors {
            cursor.last_index = 0;
        }
    }

    /// Advances local time.
    pub fn update(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }

        let duration = self.clip.duration;
        if duration <= 0.0 {
            self.finished = self.loop_mode == LoopMode::Once;
            return;
        }

        self.time += dt * self.time_scale;

        match self.loop_mode {
            LoopMode::Once => {
                if self.time >= duration {
                    self.time = duration;
                    self.finished = true;
                } else if self.time < 0.0 {
                    self.time = 0.0;
                    self.finished = true;
                }
            }
            LoopMode::Repeat => {
                if self.time >= duration || self.time < 0.0 {
                    self.time = self.time.rem_euclid(duration);
                }
            }
        }
    }

    /// Samples `channel` at the current local time.
    pub fn sample(&mut self, channel: Channel) -> f32 {
        let Some(index) = self.clip.tracks.iter().position(|t| t.channel == channel) else {
            return channel.rest_value();
        };
        let track = &self.clip.tracks[index].track;
        let cursor = &mut self.track_cursors[index];
        track
            .sample_with_cursor(self.time, cursor)
            .unwrap_or_else(|| channel.rest_value())
    }
}
