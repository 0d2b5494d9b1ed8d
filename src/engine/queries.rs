//! Read-only queries for ViewerEngine

use web_time::Instant;

use super::ViewerEngine;
use crate::annotation::{Annotation, AnnotationRegistry};
use crate::camera::flight::CameraFlightController;
use crate::condition::ConditionOverlayManager;
use crate::scene::ModelState;

/// What the prev/next navigation widget shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationView {
    /// Title of the active annotation; `None` when nothing is selected.
    pub title: Option<String>,
    /// 1-based position of the active annotation in the tour.
    pub position: Option<usize>,
    /// Number of annotations in the tour.
    pub total: usize,
}

impl ViewerEngine {
    /// State for the navigation widget.
    #[must_use]
    pub fn navigation(&self) -> NavigationView {
        let active = self.active_annotation();
        NavigationView {
            title: active.map(|a| a.title.clone()),
            position: self.selection.active_index().map(|i| i + 1),
            total: self.registry.len(),
        }
    }

    /// The active annotation, if any.
    #[must_use]
    pub fn active_annotation(&self) -> Option<&Annotation> {
        self.selection.active(&self.registry)
    }

    /// The annotation set.
    #[must_use]
    pub fn registry(&self) -> &AnnotationRegistry {
        &self.registry
    }

    /// Condition flags and effects.
    #[must_use]
    pub fn conditions(&self) -> &ConditionOverlayManager {
        &self.conditions
    }

    /// Camera flight state.
    #[must_use]
    pub fn flights(&self) -> &CameraFlightController {
        &self.flights
    }

    /// Model loader outcome.
    #[must_use]
    pub fn model(&self) -> &ModelState {
        &self.model
    }

    /// Whether the host should show the model-loading placeholder.
    #[must_use]
    pub fn placeholder_visible(&self) -> bool {
        matches!(self.model, ModelState::Loading)
    }

    /// The loader's failure message, if the model failed to load.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.model.error()
    }

    /// Whether annotation labels are shown.
    #[must_use]
    pub fn annotations_shown(&self) -> bool {
        self.overlay.is_shown()
    }

    /// Whether enough time has passed since the last
    /// [`update`](Self::update) to draw again under the frame cap.
    #[must_use]
    pub fn frame_due(&self, now: Instant) -> bool {
        self.frame_timing.should_render(now)
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }
}
