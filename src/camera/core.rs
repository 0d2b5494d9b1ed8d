use glam::{Mat4, Vec2, Vec3};

use super::frustum::Frustum;
use crate::options::CameraOptions;

/// Size of the drawing surface in CSS/logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Create a viewport, clamping each side to at least one pixel.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Width / height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Camera at the configured start pose.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::from(options.initial_eye),
            target: Vec3::from(options.initial_target),
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the view matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Build the projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh uses the [0,1] depth range
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }

    /// View frustum for the current pose.
    #[must_use]
    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(self.build_matrix())
    }

    /// Re-aim the camera at `point` without moving the eye.
    pub fn look_at(&mut self, point: Vec3) {
        self.target = point;
    }

    /// Distance from the eye to `point`.
    #[must_use]
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.eye.distance(point)
    }

    /// Project a world-space point to screen pixels (origin top-left,
    /// y down). Returns `None` for points at or behind the eye plane.
    #[must_use]
    pub fn project_to_screen(
        &self,
        point: Vec3,
        viewport: Viewport,
    ) -> Option<Vec2> {
        let clip = self.build_matrix() * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * viewport.width,
            (-ndc.y * 0.5 + 0.5) * viewport.height,
        ))
    }
}
