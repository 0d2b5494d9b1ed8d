use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Standard PBR surface description applied to a scene node.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Material {
    /// Base color (linear RGB, 0-1).
    pub color: [f32; 3],
    /// Surface roughness (0 = mirror, 1 = diffuse).
    pub roughness: f32,
    /// Metalness (0 = dielectric, 1 = metal).
    pub metalness: f32,
    /// Alpha when `transparent` is set.
    pub opacity: f32,
    /// Whether the material is alpha-blended.
    pub transparent: bool,
}

impl Material {
    /// Healthy lens: translucent white.
    pub const CLEAR_LENS: Self = Self {
        color: [1.0, 1.0, 1.0],
        roughness: 0.2,
        metalness: 0.1,
        opacity: 0.6,
        transparent: true,
    };

    /// Clouded lens: mostly opaque tan (#CD853F).
    pub const CATARACT_LENS: Self = Self {
        color: [0.804, 0.522, 0.247],
        roughness: 0.7,
        metalness: 0.3,
        opacity: 0.8,
        transparent: true,
    };

    /// Red emissive material shared by pressure arrows and blood spots.
    pub const MARKER_RED: Self = Self {
        color: [1.0, 0.267, 0.267],
        roughness: 0.5,
        metalness: 0.0,
        opacity: 0.8,
        transparent: true,
    };
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            roughness: 0.5,
            metalness: 0.0,
            opacity: 1.0,
            transparent: false,
        }
    }
}
