//! Labeled anatomical features: the registry, the active selection and
//! the screen-space label overlay.

/// Screen-space label layout and presentation bookkeeping.
pub mod overlay;
/// Validated, ordered annotation set.
pub mod registry;
/// Active annotation and prev/next navigation.
pub mod selection;

pub use overlay::{
    AnnotationOverlay, LabelLayout, LabelPresenter, LabelReconciler,
};
pub use registry::{Annotation, AnnotationRegistry};
pub use selection::{SelectionController, SelectionEvent};
