use web_time::{Duration, Instant};

/// Frame pacing with a smoothed FPS readout.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Minimum frame duration (zero = unlimited)
    min_frame_duration: Duration,
    /// Timestamp of the previous frame
    last_frame: Instant,
    /// Exponential moving average of the frame rate
    smoothed_fps: f32,
    /// Weight of the newest sample (0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a frame timer with the given FPS cap (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32, now: Instant) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };

        Self {
            min_frame_duration,
            last_frame: now,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Whether enough time has passed since the last frame to draw again.
    #[must_use]
    pub fn should_render(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_frame) >= self.min_frame_duration
    }

    /// Record a finished frame at `now`.
    pub fn end_frame(&mut self, now: Instant) {
        let frame_time =
            now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if frame_time > 0.0 {
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + (1.0 / frame_time) * self.smoothing;
        }
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converges_toward_actual_rate() {
        let t0 = Instant::now();
        let mut timing = FrameTiming::new(0, t0);
        for i in 1..=400u64 {
            timing.end_frame(t0 + Duration::from_millis(i * 33));
        }
        assert!((timing.fps() - 30.3).abs() < 0.5, "fps = {}", timing.fps());
    }

    #[test]
    fn test_cap_delays_next_frame() {
        let t0 = Instant::now();
        let timing = FrameTiming::new(50, t0);
        assert!(!timing.should_render(t0 + Duration::from_millis(5)));
        assert!(timing.should_render(t0 + Duration::from_millis(20)));
        assert!(FrameTiming::new(0, t0).should_render(t0));
    }
}
