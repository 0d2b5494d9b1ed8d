use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera Flight", inline)]
#[serde(default)]
/// Timing of the camera flight toward an activated annotation.
pub struct FlightOptions {
    /// Flight duration in milliseconds.
    #[schemars(title = "Duration (ms)", range(min = 0, max = 5000), extend("step" = 50))]
    pub duration_ms: u64,
    /// Progress curve; every curve ends exactly at the target.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
}

impl Default for FlightOptions {
    fn default() -> Self {
        Self {
            duration_ms: 1000,
            easing: EasingFunction::Linear,
        }
    }
}
