//! The viewer's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a label
//! click, the navigation widget, the condition menu or a mouse gesture, is
//! represented as a `ViewerCommand`. Hosts construct commands and pass
//! them to [`ViewerEngine::execute`](super::ViewerEngine::execute).

use glam::Vec2;

/// A discrete action the viewer can perform.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    // ── Annotations ─────────────────────────────────────────────────
    /// Activate an annotation and fly the camera to it.
    SelectAnnotation {
        /// Annotation id.
        id: String,
    },

    /// Activate the next annotation in the tour, wrapping around.
    NextAnnotation,

    /// Activate the previous annotation in the tour, wrapping around.
    PreviousAnnotation,

    /// Deselect the active annotation and stop any camera flight.
    ClearSelection,

    /// Flip the show-annotations flag.
    ToggleAnnotations,

    /// Show or hide every annotation label.
    SetShowAnnotations {
        /// New flag value.
        show: bool,
    },

    // ── Conditions ──────────────────────────────────────────────────
    /// Toggle a simulated condition from the condition menu.
    SetCondition {
        /// Condition string id (e.g. `"glaucoma"`).
        id: String,
        /// Whether the condition is on.
        active: bool,
    },

    // ── Camera ──────────────────────────────────────────────────────
    /// Orbit the camera by `delta` pixels of mouse movement.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },
}
