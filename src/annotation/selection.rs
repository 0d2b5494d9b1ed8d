//! Active-annotation state and prev/next navigation.
//!
//! Label clicks, arrow keys and the navigation widget all funnel into the
//! same [`SelectionController`], so every input channel observes one
//! selection. Each change is queued as a [`SelectionEvent`] for widgets
//! that need to stay in sync.

use super::registry::{Annotation, AnnotationRegistry};
use crate::error::EyeViewError;

/// Notification emitted when the active annotation changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// An annotation became active (also emitted on re-selection).
    Focused {
        /// Id of the now-active annotation.
        id: String,
        /// Position in the ordered sequence.
        index: usize,
    },
    /// The selection was cleared.
    Cleared,
}

/// Tracks the single active annotation as an index into the ordered
/// registry sequence.
#[derive(Debug, Default)]
pub struct SelectionController {
    active: Option<usize>,
    events: Vec<SelectionEvent>,
}

impl SelectionController {
    /// Controller with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate the annotation with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`EyeViewError::NotFound`] if `id` is not registered; the
    /// selection is left unchanged.
    pub fn select_by_id<'r>(
        &mut self,
        registry: &'r AnnotationRegistry,
        id: &str,
    ) -> Result<&'r Annotation, EyeViewError> {
        let index = registry
            .index_of(id)
            .ok_or_else(|| EyeViewError::NotFound(id.to_owned()))?;
        self.activate(registry, index)
            .ok_or_else(|| EyeViewError::NotFound(id.to_owned()))
    }

    /// Advance to the next annotation, wrapping to the first. From no
    /// selection, activates the first annotation. No-op on an empty
    /// registry.
    pub fn select_next<'r>(
        &mut self,
        registry: &'r AnnotationRegistry,
    ) -> Option<&'r Annotation> {
        let len = registry.len();
        if len == 0 {
            return None;
        }
        let index = self.active.map_or(0, |i| (i + 1) % len);
        self.activate(registry, index)
    }

    /// Retreat to the previous annotation, wrapping to the last. From no
    /// selection, activates the last annotation. No-op on an empty
    /// registry.
    pub fn select_previous<'r>(
        &mut self,
        registry: &'r AnnotationRegistry,
    ) -> Option<&'r Annotation> {
        let len = registry.len();
        if len == 0 {
            return None;
        }
        let index = self.active.map_or(len - 1, |i| (i + len - 1) % len);
        self.activate(registry, index)
    }

    /// Clear the selection. Returns whether anything was selected.
    pub fn clear(&mut self) -> bool {
        if self.active.take().is_some() {
            self.events.push(SelectionEvent::Cleared);
            true
        } else {
            false
        }
    }

    /// Index of the active annotation in the ordered sequence.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The active annotation, resolved against `registry`.
    #[must_use]
    pub fn active<'r>(
        &self,
        registry: &'r AnnotationRegistry,
    ) -> Option<&'r Annotation> {
        self.active.and_then(|i| registry.at(i))
    }

    /// Id of the active annotation.
    #[must_use]
    pub fn active_id<'r>(
        &self,
        registry: &'r AnnotationRegistry,
    ) -> Option<&'r str> {
        self.active(registry).map(|a| a.id.as_str())
    }

    /// Take all queued selection events, oldest first.
    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        std::mem::take(&mut self.events)
    }

    fn activate<'r>(
        &mut self,
        registry: &'r AnnotationRegistry,
        index: usize,
    ) -> Option<&'r Annotation> {
        let annotation = registry.at(index)?;
        self.active = Some(index);
        self.events.push(SelectionEvent::Focused {
            id: annotation.id.clone(),
            index,
        });
        log::debug!(
            "Annotation {} ({}) focused",
            annotation.order,
            annotation.id
        );
        Some(annotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::registry::test_annotation;

    fn abc() -> AnnotationRegistry {
        AnnotationRegistry::new(vec![
            test_annotation("A", 1),
            test_annotation("B", 2),
            test_annotation("C", 3),
        ])
        .unwrap()
    }

    fn next_id(sel: &mut SelectionController, reg: &AnnotationRegistry) -> String {
        sel.select_next(reg).unwrap().id.clone()
    }

    fn prev_id(sel: &mut SelectionController, reg: &AnnotationRegistry) -> String {
        sel.select_previous(reg).unwrap().id.clone()
    }

    #[test]
    fn test_select_by_id_sets_active() {
        let reg = AnnotationRegistry::eye().unwrap();
        let mut sel = SelectionController::new();
        for a in reg.ordered() {
            let _ = sel.select_by_id(&reg, &a.id).unwrap();
            assert_eq!(sel.active_id(&reg), Some(a.id.as_str()));
        }
    }

    #[test]
    fn test_unknown_id_leaves_selection_unchanged() {
        let reg = abc();
        let mut sel = SelectionController::new();
        let _ = sel.select_by_id(&reg, "B").unwrap();
        let _ = sel.drain_events();

        let err = sel.select_by_id(&reg, "Z").unwrap_err();
        assert!(matches!(err, EyeViewError::NotFound(_)));
        assert_eq!(sel.active_id(&reg), Some("B"));
        assert!(sel.drain_events().is_empty());
    }

    #[test]
    fn test_navigation_scenario() {
        let reg = abc();
        let mut sel = SelectionController::new();
        assert_eq!(next_id(&mut sel, &reg), "A");
        assert_eq!(next_id(&mut sel, &reg), "B");
        assert_eq!(prev_id(&mut sel, &reg), "A");
        let _ = next_id(&mut sel, &reg);
        assert_eq!(next_id(&mut sel, &reg), "C");
        assert_eq!(next_id(&mut sel, &reg), "A");
    }

    #[test]
    fn test_next_cycles_back_to_start() {
        let reg = AnnotationRegistry::eye().unwrap();
        let mut sel = SelectionController::new();
        let _ = sel.select_by_id(&reg, "iris").unwrap();
        for _ in 0..reg.len() {
            let _ = sel.select_next(&reg);
        }
        assert_eq!(sel.active_id(&reg), Some("iris"));
    }

    #[test]
    fn test_previous_undoes_next_including_wrap() {
        let reg = abc();
        let mut sel = SelectionController::new();
        for start in ["A", "B", "C"] {
            let _ = sel.select_by_id(&reg, start).unwrap();
            let _ = sel.select_next(&reg);
            let _ = sel.select_previous(&reg);
            assert_eq!(sel.active_id(&reg), Some(start));
        }

        let _ = sel.select_by_id(&reg, "A").unwrap();
        assert_eq!(prev_id(&mut sel, &reg), "C");
    }

    #[test]
    fn test_previous_from_none_selects_last() {
        let reg = abc();
        let mut sel = SelectionController::new();
        assert_eq!(prev_id(&mut sel, &reg), "C");
    }

    #[test]
    fn test_empty_registry_is_noop() {
        let reg = AnnotationRegistry::default();
        let mut sel = SelectionController::new();
        assert!(sel.select_next(&reg).is_none());
        assert!(sel.select_previous(&reg).is_none());
        assert_eq!(sel.active_index(), None);
        assert!(sel.drain_events().is_empty());
    }

    #[test]
    fn test_events_track_every_channel() {
        let reg = abc();
        let mut sel = SelectionController::new();
        let _ = sel.select_by_id(&reg, "C").unwrap();
        let _ = sel.select_next(&reg);
        assert!(sel.clear());
        assert!(!sel.clear());

        assert_eq!(
            sel.drain_events(),
            vec![
                SelectionEvent::Focused {
                    id: "C".into(),
                    index: 2
                },
                SelectionEvent::Focused {
                    id: "A".into(),
                    index: 0
                },
                SelectionEvent::Cleared,
            ]
        );
    }
}
