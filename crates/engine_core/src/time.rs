//! Time management for the frame loop.

use std::time::{Duration, Instant};

/// Default ceiling for a single frame delta. A backgrounded window can stall
/// the loop for seconds; anything larger than this is reported as this.
pub const DEFAULT_MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Tracks session time. Elapsed time is always measured from session start,
/// never accumulated from deltas, so animation driven by it is immune to
/// uneven frame pacing.
#[derive(Debug)]
pub struct SessionClock {
    /// Time when the session started.
    start_time: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame, capped at `max_delta`.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Upper bound for `delta`.
    max_delta: Duration,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionClock {
    /// Create a clock starting now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a clock with an explicit start instant.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start_time: start,
            last_frame: start,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
            max_delta: DEFAULT_MAX_FRAME_DELTA,
        }
    }

    /// Set the delta ceiling.
    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        self.max_delta = max_delta;
        self
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Update timing as if the frame started at `now`.
    /// Instants earlier than the previous frame yield a zero delta.
    pub fn update_at(&mut self, now: Instant) {
        let now = now.max(self.last_frame);
        self.delta = (now - self.last_frame).min(self.max_delta);
        self.last_frame = now;
        self.elapsed = now - self.start_time;
        self.frame_count += 1;
    }

    /// Get the capped delta time as a Duration.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Get total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Get total elapsed time as Duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta.as_secs_f32() > 0.0 {
            1.0 / self.delta.as_secs_f32()
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_is_capped_after_stall() {
        let start = Instant::now();
        let mut clock = SessionClock::starting_at(start);
        clock.update_at(start + Duration::from_secs(5));
        assert_eq!(clock.delta(), DEFAULT_MAX_FRAME_DELTA);
        // Elapsed still reflects wall time since start.
        assert_eq!(clock.elapsed(), Duration::from_secs(5));
    }

    #[test]
    fn elapsed_is_absolute_not_accumulated() {
        let start = Instant::now();
        let mut clock = SessionClock::starting_at(start);
        for ms in [16, 500, 2000, 2016] {
            clock.update_at(start + Duration::from_millis(ms));
        }
        assert_eq!(clock.elapsed(), Duration::from_millis(2016));
        assert_eq!(clock.frame_count(), 4);
    }

    #[test]
    fn going_backwards_yields_zero_delta() {
        let start = Instant::now();
        let mut clock = SessionClock::starting_at(start);
        clock.update_at(start + Duration::from_millis(50));
        clock.update_at(start + Duration::from_millis(10));
        assert_eq!(clock.delta(), Duration::ZERO);
        assert_eq!(clock.elapsed(), Duration::from_millis(50));
    }
}
