use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::ViewerCommand;

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// next_annotation = "ArrowRight"
/// toggle_annotations = "KeyH"
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Step back through the annotation tour.
    PreviousAnnotation,
    /// Step forward through the annotation tour.
    NextAnnotation,
    /// Deselect the active annotation.
    ClearSelection,
    /// Show or hide every annotation label.
    ToggleAnnotations,
}

impl KeyAction {
    /// The parameterless command this action triggers.
    #[must_use]
    pub fn to_command(self) -> ViewerCommand {
        match self {
            Self::PreviousAnnotation => ViewerCommand::PreviousAnnotation,
            Self::NextAnnotation => ViewerCommand::NextAnnotation,
            Self::ClearSelection => ViewerCommand::ClearSelection,
            Self::ToggleAnnotations => ViewerCommand::ToggleAnnotations,
        }
    }
}
