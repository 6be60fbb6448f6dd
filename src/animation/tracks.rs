use serde::{Deserialize, Serialize};

use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
}

const MAX_SCAN_OFFSET: usize = 3;

/// Remembers the keyframe interval used by the previous sample so that
/// steadily advancing playback finds the next interval in O(1).
#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Checks the keyframe data, returning a human readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.times.is_empty() {
            return Err("track has no keyframes".to_string());
        }
        if self.times.len() != self.values.len() {
            return Err(format!(
                "track has {} timestamps but {} values",
                self.times.len(),
                self.values.len()
            ));
        }
        if self.times.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err("timestamps must be finite and non-negative".to_string());
        }
        if self.times.windows(2).any(|w| w[1] < w[0]) {
            return Err("timestamps must be sorted in ascending order".to_string());
        }
        Ok(())
    }

    /// Time of the last keyframe, `0.0` for an empty track.
    #[must_use]
    pub fn end_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Stateless sample using a binary search. Returns `None` for an empty track.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        if self.times.is_empty() || self.values.len() < self.times.len() {
            return None;
        }
        let next_idx = self.times.partition_point(|&t| t <= time);
        let idx = next_idx.saturating_sub(1);
        Some(self.sample_at_frame(idx, time))
    }

    /// Samples the track, starting the interval search from `cursor`.
    ///
    /// Returns `None` for an empty track.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Option<T> {
        let len = self.times.len();
        if len == 0 || self.values.len() < len {
            return None;
        }
        if len == 1 {
            return Some(self.values[0]);
        }

        // Cursor may be stale if the track changed underneath it
        let i = cursor.last_index.min(len - 1);
        let t_curr = self.times[i];

        let found_index = if time >= t_curr {
            // Forward scan: normal playback
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                let idx = i + offset;
                if idx >= len - 1 {
                    if time >= self.times[len - 1] {
                        res = Some(len - 1);
                    }
                    break;
                }
                if time < self.times[idx + 1] {
                    res = Some(idx);
                    break;
                }
            }
            res
        } else {
            // Backward scan: loop wrap or restart
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                if i < offset {
                    break;
                }
                let idx = i - offset;
                if time >= self.times[idx] {
                    res = Some(idx);
                    break;
                }
            }
            res
        };

        let final_index = found_index.unwrap_or_else(|| {
            // Large jump, fall back to binary search
            self.times.partition_point(|&t| t <= time).saturating_sub(1)
        });
        cursor.last_index = final_index;

        Some(self.sample_at_frame(final_index, time))
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();

        if index >= len - 1 {
            return self.values[len - 1];
        }

        let next_idx = index + 1;
        let t0 = self.times[index];
        let t1 = self.times[next_idx];
        let dt = t1 - t0;

        let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        match self.interpolation {
            InterpolationMode::Step => self.values[index],
            InterpolationMode::Linear => {
                T::interpolate_linear(self.values[index], self.values[next_idx], t)
            }
        }
    }
}
