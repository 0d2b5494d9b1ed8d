use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::Material;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Condition Effects", inline)]
#[serde(default)]
/// Scene node and materials used by the condition overlays.
pub struct EffectOptions {
    /// Exact name of the lens mesh in the loaded model.
    pub lens_node: String,
    /// Lens material while cataract is inactive.
    pub lens_clear: Material,
    /// Lens material while cataract is active.
    pub lens_cataract: Material,
}

impl Default for EffectOptions {
    fn default() -> Self {
        Self {
            lens_node: "Lens_Lens_0".into(),
            lens_clear: Material::CLEAR_LENS,
            lens_cataract: Material::CATARACT_LENS,
        }
    }
}
