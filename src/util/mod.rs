//! Shared utilities: easing curves for camera flights and frame pacing.

pub mod easing;
/// Frame pacing and smoothed FPS.
pub mod frame_timing;
