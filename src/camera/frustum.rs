//! View frustum used to hide labels whose anchor is out of view.
//!
//! Planes are extracted from the view-projection matrix (Gribb/Hartmann,
//! `[0,1]` depth range) and point inward.

use glam::{Mat4, Vec3, Vec4};

/// Plane `normal · p + distance = 0` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal pointing into the frustum.
    pub normal: Vec3,
    /// Signed offset from the origin.
    pub distance: f32,
}

impl Plane {
    fn from_row(row: Vec4) -> Self {
        let normal = row.truncate();
        let len = normal.length();
        if len > 0.0 {
            Self {
                normal: normal / len,
                distance: row.w / len,
            }
        } else {
            Self {
                normal: Vec3::ZERO,
                distance: 0.0,
            }
        }
    }

    /// Signed distance (positive = inside).
    #[inline]
    #[must_use]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Six inward-facing planes: left, right, bottom, top, near, far.
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    /// Clipping planes.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract the frustum of a view-projection matrix.
    #[must_use]
    pub fn from_view_projection(vp: Mat4) -> Self {
        let m = vp.transpose();
        let (r0, r1, r2, r3) = (m.x_axis, m.y_axis, m.z_axis, m.w_axis);
        Self {
            planes: [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r2, r3 - r2]
                .map(Plane::from_row),
        }
    }

    /// Whether `point` lies inside (or on) every plane.
    #[inline]
    #[must_use]
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|p| p.distance_to_point(point) >= 0.0)
    }
}
