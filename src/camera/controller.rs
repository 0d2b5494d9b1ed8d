use glam::{Quat, Vec2, Vec3};

use super::core::{Camera, Viewport};
use crate::options::CameraOptions;

/// Cosine limit that keeps the orbit from flipping over the poles.
const POLE_LIMIT: f32 = 0.995;

/// Orbit camera: drag rotates the eye around the look-at target, scroll
/// zooms along the view ray within a distance range.
///
/// The orbit state is derived from [`Camera::eye`] and [`Camera::target`]
/// on every call, so poses written by a camera flight are picked up
/// without any extra synchronisation.
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Camera pose and projection.
    pub camera: Camera,
    viewport: Viewport,
    rotate_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
}

impl CameraController {
    /// Controller at the configured start pose.
    #[must_use]
    pub fn new(options: &CameraOptions, viewport: Viewport) -> Self {
        Self {
            camera: Camera::from_options(options, viewport.aspect()),
            viewport,
            rotate_speed: options.rotate_speed,
            zoom_speed: options.zoom_speed,
            min_distance: options.min_distance,
            max_distance: options.max_distance.max(options.min_distance),
        }
    }

    /// Re-read speeds, distance limits and projection from `options`
    /// without moving the camera.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.rotate_speed = options.rotate_speed;
        self.zoom_speed = options.zoom_speed;
        self.min_distance = options.min_distance;
        self.max_distance = options.max_distance.max(options.min_distance);
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
    }

    /// Current drawing-surface size.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update the viewport and aspect ratio.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        self.camera.aspect = self.viewport.aspect();
    }

    /// Distance from eye to target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.camera.eye.distance(self.camera.target)
    }

    /// Orbit by `delta` pixels of drag.
    pub fn rotate(&mut self, delta: Vec2) {
        let offset = self.camera.eye - self.camera.target;
        if offset.length_squared() <= f32::EPSILON {
            return;
        }

        // Vertical rotation around the camera's right vector
        let right = offset.cross(Vec3::Y).normalize_or_zero();
        let mut rotated = offset;
        if right != Vec3::ZERO {
            let pitch =
                Quat::from_axis_angle(right, delta.y * self.rotate_speed);
            let candidate = pitch * offset;
            let same_side = candidate.cross(Vec3::Y).dot(right) > 0.0;
            if same_side && candidate.normalize().dot(Vec3::Y).abs() < POLE_LIMIT
            {
                rotated = candidate;
            }
        }

        // Horizontal rotation around world up
        let yaw = Quat::from_axis_angle(Vec3::Y, -delta.x * self.rotate_speed);
        self.camera.eye = self.camera.target + yaw * rotated;
    }

    /// Zoom toward (positive) or away from (negative) the target.
    ///
    /// A flight may leave the camera outside the distance range. Zooming
    /// then only moves it toward the range, never past its current
    /// distance in the wrong direction.
    pub fn zoom(&mut self, delta: f32) {
        let offset = self.camera.eye - self.camera.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return;
        }
        let min = self.min_distance.min(distance);
        let max = self.max_distance.max(distance);
        let new_distance =
            (distance * (1.0 - delta * self.zoom_speed)).clamp(min, max);
        self.camera.eye = self.camera.target + offset / distance * new_distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> CameraController {
        CameraController::new(&CameraOptions::default(), Viewport::new(1280.0, 720.0))
    }

    #[test]
    fn test_rotate_preserves_distance() {
        let mut ctl = controller();
        let before = ctl.distance();
        ctl.rotate(Vec2::new(40.0, -25.0));
        assert!((ctl.distance() - before).abs() < 1e-3);
        assert_ne!(ctl.camera.eye, Vec3::new(-1.0, 7.0, 11.0));
    }

    #[test]
    fn test_rotate_never_crosses_pole() {
        let mut ctl = controller();
        for _ in 0..200 {
            ctl.rotate(Vec2::new(0.0, 50.0));
        }
        let dir = (ctl.camera.eye - ctl.camera.target).normalize();
        assert!(dir.dot(Vec3::Y).abs() < POLE_LIMIT);
    }

    #[test]
    fn test_zoom_clamps_to_distance_range() {
        let mut ctl = controller();
        for _ in 0..100 {
            ctl.zoom(1.0);
        }
        assert!((ctl.distance() - 6.0).abs() < 1e-3);
        for _ in 0..100 {
            ctl.zoom(-1.0);
        }
        assert!((ctl.distance() - 14.0).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_inside_min_distance_never_pushes_out() {
        let mut ctl = controller();
        ctl.camera.target = Vec3::new(1.0, 2.0, 3.0);
        ctl.camera.eye = ctl.camera.target + Vec3::new(0.0, 0.0, 3.0);

        ctl.zoom(0.1);
        assert!((ctl.distance() - 3.0).abs() < 1e-4);

        ctl.zoom(-0.5);
        let backed_off = ctl.distance();
        assert!(backed_off > 3.0 && backed_off < 6.0);
        for _ in 0..100 {
            ctl.zoom(-1.0);
        }
        assert!((ctl.distance() - 14.0).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_beyond_max_distance_only_moves_in() {
        let mut ctl = controller();
        ctl.camera.target = Vec3::ZERO;
        ctl.camera.eye = Vec3::new(0.0, 0.0, 20.0);

        ctl.zoom(-0.5);
        assert!((ctl.distance() - 20.0).abs() < 1e-4);
        ctl.zoom(0.1);
        assert!(ctl.distance() < 20.0);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut ctl = controller();
        ctl.resize(500.0, 1000.0);
        assert_eq!(ctl.camera.aspect, 0.5);
        assert_eq!(ctl.viewport(), Viewport::new(500.0, 1000.0));
    }
}
