use std::time::{Duration, Instant};

/// Largest delta the core will integrate in one tick by default (1/15 s).
pub const DEFAULT_MAX_DELTA: f32 = 1.0 / 15.0;

/// Clamps a frame delta into `[0, max_delta]`. `NaN` becomes zero.
#[must_use]
pub fn clamp_delta(dt: f32, max_delta: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, max_delta.max(0.0))
}

/// Timer for tracking frame timing and elapsed time.
pub struct Timer {
    start_time: Instant,
    last_update: Instant,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Creates a new timer starting from now.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Samples the wall clock; call once per frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_update;
        self.elapsed = now - self.start_time;
        self.last_update = now;
        self.frame_count += 1;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_delta_bounds() {
        assert_eq!(clamp_delta(0.5, DEFAULT_MAX_DELTA), DEFAULT_MAX_DELTA);
        assert_eq!(clamp_delta(-0.1, DEFAULT_MAX_DELTA), 0.0);
        assert_eq!(clamp_delta(f32::NAN, DEFAULT_MAX_DELTA), 0.0);
        assert!((clamp_delta(1.0 / 60.0, DEFAULT_MAX_DELTA) - 1.0 / 60.0).abs() < 1e-9);
    }
}
