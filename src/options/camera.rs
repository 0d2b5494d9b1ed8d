use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, start pose and orbit parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Eye position at startup.
    #[schemars(skip)]
    pub initial_eye: [f32; 3],
    /// Look-at target at startup (also the orbit pivot).
    #[schemars(skip)]
    pub initial_target: [f32; 3],
    /// Orbit rotation in radians per pixel of drag.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub rotate_speed: f32,
    /// Fractional distance change per scroll step.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Closest orbit distance reachable by zooming.
    #[schemars(title = "Min Distance", range(min = 1.0, max = 20.0), extend("step" = 0.5))]
    pub min_distance: f32,
    /// Farthest orbit distance reachable by zooming.
    #[schemars(title = "Max Distance", range(min = 1.0, max = 50.0), extend("step" = 0.5))]
    pub max_distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 34.0,
            znear: 0.1,
            zfar: 1000.0,
            initial_eye: [-1.0, 7.0, 11.0],
            initial_target: [0.0, 0.0, 0.0],
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            min_distance: 6.0,
            max_distance: 14.0,
        }
    }
}
