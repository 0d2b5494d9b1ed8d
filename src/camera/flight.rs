//! Timed camera flights toward an annotation's framing target.
//!
//! The controller is a two-state machine (`Idle → Flying → Idle`)
//! advanced by the host's per-frame [`tick`](CameraFlightController::tick).
//! A new flight always replaces the current one; the replacement starts
//! from wherever the camera is at that moment.

use glam::Vec3;
use web_time::{Duration, Instant};

use super::core::Camera;
use crate::options::FlightOptions;
use crate::util::easing::EasingFunction;

/// One in-progress interpolation of the camera eye position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFlight {
    /// Eye position captured when the flight started.
    pub start_position: Vec3,
    /// Eye position at completion.
    pub target_position: Vec3,
    /// Point the camera is re-aimed at on every tick.
    pub look_at: Vec3,
    /// When the flight started.
    pub start_time: Instant,
    /// Total flight duration.
    pub duration: Duration,
    /// Progress curve.
    pub easing: EasingFunction,
}

impl CameraFlight {
    /// Raw progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Eye position at `now`. Exactly `target_position` once complete.
    #[must_use]
    pub fn position_at(&self, now: Instant) -> Vec3 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.target_position;
        }
        self.start_position
            .lerp(self.target_position, self.easing.evaluate(t))
    }
}

/// Result of advancing the controller by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightStatus {
    /// No flight; the camera was not touched.
    Idle,
    /// The camera moved and the flight continues.
    Flying {
        /// Raw progress in `[0, 1)`.
        progress: f32,
    },
    /// The camera reached the target this tick; the controller is idle
    /// again.
    Landed,
}

/// Drives at most one [`CameraFlight`] at a time.
#[derive(Debug, Clone)]
pub struct CameraFlightController {
    flight: Option<CameraFlight>,
    duration: Duration,
    easing: EasingFunction,
}

impl CameraFlightController {
    /// Controller using the given default duration and easing.
    #[must_use]
    pub fn new(duration: Duration, easing: EasingFunction) -> Self {
        Self {
            flight: None,
            duration,
            easing,
        }
    }

    /// Controller configured from [`FlightOptions`].
    #[must_use]
    pub fn from_options(options: &FlightOptions) -> Self {
        Self::new(Duration::from_millis(options.duration_ms), options.easing)
    }

    /// Adopt the duration and easing from `options` for future flights.
    /// A flight in progress keeps its own timing.
    pub fn configure(&mut self, options: &FlightOptions) {
        self.duration = Duration::from_millis(options.duration_ms);
        self.easing = options.easing;
    }

    /// Start a flight with the default duration. See
    /// [`start_flight_with_duration`](Self::start_flight_with_duration).
    pub fn start_flight(
        &mut self,
        from: Vec3,
        to: Vec3,
        look_at: Vec3,
        now: Instant,
    ) {
        self.start_flight_with_duration(from, to, look_at, self.duration, now);
    }

    /// Start a flight from `from` (the camera's current eye position) to
    /// `to`, discarding any flight in progress.
    pub fn start_flight_with_duration(
        &mut self,
        from: Vec3,
        to: Vec3,
        look_at: Vec3,
        duration: Duration,
        now: Instant,
    ) {
        if self.flight.is_some() {
            log::debug!("Camera flight superseded");
        }
        self.flight = Some(CameraFlight {
            start_position: from,
            target_position: to,
            look_at,
            start_time: now,
            duration,
            easing: self.easing,
        });
    }

    /// Advance the active flight, writing the camera pose. Does nothing
    /// when idle.
    pub fn tick(&mut self, camera: &mut Camera, now: Instant) -> FlightStatus {
        let Some(flight) = self.flight else {
            return FlightStatus::Idle;
        };

        camera.eye = flight.position_at(now);
        camera.look_at(flight.look_at);

        let progress = flight.progress(now);
        if progress >= 1.0 {
            self.flight = None;
            log::debug!("Camera flight landed at {}", flight.target_position);
            FlightStatus::Landed
        } else {
            FlightStatus::Flying { progress }
        }
    }

    /// Abandon the active flight, leaving the camera where it is. Returns
    /// whether a flight was in progress.
    pub fn stop(&mut self) -> bool {
        self.flight.take().is_some()
    }

    /// Whether a flight is in progress.
    #[must_use]
    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    /// The active flight, if any.
    #[must_use]
    pub fn flight(&self) -> Option<&CameraFlight> {
        self.flight.as_ref()
    }

    /// Default duration for new flights.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Default for CameraFlightController {
    fn default() -> Self {
        Self::from_options(&FlightOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CameraOptions;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn camera() -> Camera {
        Camera::from_options(&CameraOptions::default(), 1.0)
    }

    /// Distance from `p` to the segment `a..b`.
    fn distance_to_segment(p: Vec3, a: Vec3, b: Vec3) -> f32 {
        let ab = b - a;
        let t = ((p - a).dot(ab) / ab.length_squared()).clamp(0.0, 1.0);
        p.distance(a + ab * t)
    }

    #[test]
    fn test_flight_hits_endpoints_exactly() {
        let mut cam = camera();
        let from = cam.eye;
        let to = Vec3::new(-2.0, 4.0, 5.0);
        let anchor = Vec3::new(1.0, 2.4, 3.2);
        let t0 = Instant::now();
        let mut ctl = CameraFlightController::new(ms(1000), EasingFunction::Linear);
        ctl.start_flight(from, to, anchor, t0);

        assert_eq!(ctl.tick(&mut cam, t0), FlightStatus::Flying { progress: 0.0 });
        assert_eq!(cam.eye, from);
        assert_eq!(cam.target, anchor);

        assert_eq!(ctl.tick(&mut cam, t0 + ms(1000)), FlightStatus::Landed);
        assert_eq!(cam.eye, to);
        assert!(!ctl.is_flying());
    }

    #[test]
    fn test_late_tick_lands_on_target() {
        let mut cam = camera();
        let to = Vec3::new(3.0, 1.0, 2.0);
        let t0 = Instant::now();
        let mut ctl = CameraFlightController::default();
        ctl.start_flight(cam.eye, to, Vec3::ZERO, t0);
        assert_eq!(ctl.tick(&mut cam, t0 + ms(5000)), FlightStatus::Landed);
        assert_eq!(cam.eye, to);
    }

    #[test]
    fn test_idle_after_landing_leaves_camera_alone() {
        let mut cam = camera();
        let t0 = Instant::now();
        let mut ctl = CameraFlightController::default();
        ctl.start_flight(cam.eye, Vec3::ONE, Vec3::ZERO, t0);
        let _ = ctl.tick(&mut cam, t0 + ms(2000));

        cam.eye = Vec3::new(9.0, 9.0, 9.0);
        assert_eq!(ctl.tick(&mut cam, t0 + ms(3000)), FlightStatus::Idle);
        assert_eq!(cam.eye, Vec3::new(9.0, 9.0, 9.0));
    }

    #[test]
    fn test_positions_stay_on_segment_and_progress() {
        let mut cam = camera();
        let from = cam.eye;
        let to = Vec3::new(-1.5, 5.0, 9.0);
        let t0 = Instant::now();
        let mut ctl = CameraFlightController::default();
        ctl.start_flight(from, to, Vec3::ZERO, t0);

        let mut last_distance = f32::INFINITY;
        for step in (0..=1000).step_by(50) {
            let _ = ctl.tick(&mut cam, t0 + ms(step));
            assert!(distance_to_segment(cam.eye, from, to) < 1e-4);
            let remaining = cam.eye.distance(to);
            assert!(remaining <= last_distance + 1e-5);
            last_distance = remaining;
        }
        assert_eq!(cam.eye, to);
    }

    #[test]
    fn test_midpoint_is_linear_blend() {
        let mut cam = camera();
        let from = Vec3::ZERO;
        let to = Vec3::new(10.0, 0.0, 0.0);
        let t0 = Instant::now();
        let mut ctl = CameraFlightController::new(ms(1000), EasingFunction::Linear);
        ctl.start_flight(from, to, Vec3::Y, t0);
        let status = ctl.tick(&mut cam, t0 + ms(500));
        assert_eq!(status, FlightStatus::Flying { progress: 0.5 });
        assert!((cam.eye.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_second_flight_supersedes_first() {
        let mut cam = camera();
        let first = Vec3::new(10.0, 0.0, 0.0);
        let second = Vec3::new(0.0, 10.0, 0.0);
        let t0 = Instant::now();
        let mut ctl = CameraFlightController::default();
        ctl.start_flight(cam.eye, first, Vec3::ZERO, t0);
        let _ = ctl.tick(&mut cam, t0 + ms(400));
        let midway = cam.eye;

        ctl.start_flight(cam.eye, second, Vec3::ONE, t0 + ms(400));
        assert_eq!(ctl.flight().unwrap().start_position, midway);

        let _ = ctl.tick(&mut cam, t0 + ms(1400));
        assert_eq!(cam.eye, second);
        assert_eq!(cam.target, Vec3::ONE);
        assert_eq!(ctl.tick(&mut cam, t0 + ms(3000)), FlightStatus::Idle);
        assert_eq!(cam.eye, second);
    }

    #[test]
    fn test_stop_freezes_camera() {
        let mut cam = camera();
        let t0 = Instant::now();
        let mut ctl = CameraFlightController::default();
        ctl.start_flight(cam.eye, Vec3::ZERO, Vec3::ONE, t0);
        let _ = ctl.tick(&mut cam, t0 + ms(300));
        let frozen = cam.eye;

        assert!(ctl.stop());
        assert!(!ctl.stop());
        assert_eq!(ctl.tick(&mut cam, t0 + ms(900)), FlightStatus::Idle);
        assert_eq!(cam.eye, frozen);
    }

    #[test]
    fn test_zero_duration_lands_immediately() {
        let mut cam = camera();
        let t0 = Instant::now();
        let mut ctl = CameraFlightController::new(Duration::ZERO, EasingFunction::Linear);
        ctl.start_flight(cam.eye, Vec3::X, Vec3::ZERO, t0);
        assert_eq!(ctl.tick(&mut cam, t0), FlightStatus::Landed);
        assert_eq!(cam.eye, Vec3::X);
    }

    #[test]
    fn test_eased_flight_still_reaches_target() {
        let mut cam = camera();
        let t0 = Instant::now();
        let mut ctl =
            CameraFlightController::new(ms(800), EasingFunction::DEFAULT);
        ctl.start_flight(cam.eye, Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, t0);
        let _ = ctl.tick(&mut cam, t0 + ms(800));
        assert_eq!(cam.eye, Vec3::new(1.0, 2.0, 3.0));
    }
}
