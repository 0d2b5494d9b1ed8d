use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Display toggles and label sizing.
pub struct DisplayOptions {
    /// Whether annotation labels are drawn at all.
    #[schemars(title = "Show Annotations")]
    pub show_annotations: bool,
    /// Viewport clear color (linear RGB).
    #[schemars(skip)]
    pub background_color: [f32; 3],
    /// Labels shrink once the camera is farther than this from the anchor
    /// (`scale = 1 / max(distance / divisor, 1)`).
    #[schemars(title = "Label Shrink Distance", range(min = 1.0, max = 50.0), extend("step" = 0.5))]
    pub label_distance_divisor: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_annotations: true,
            // #AECDFE
            background_color: [0.682, 0.804, 0.996],
            label_distance_divisor: 10.0,
        }
    }
}
