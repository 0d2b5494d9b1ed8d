//! Screen-space annotation labels.
//!
//! Layout is a pure function of the registry, the camera pose and the
//! active selection. Turning layouts into actual UI elements is left to a
//! [`LabelPresenter`]; [`LabelReconciler`] tracks which labels are mounted
//! so that hiding the overlay or tearing the viewer down releases every
//! element that was created.

use glam::Vec2;

use super::registry::AnnotationRegistry;
use crate::camera::core::{Camera, Viewport};
use crate::options::DisplayOptions;

/// Where and how one annotation label should be drawn this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    /// Annotation id (also the click payload).
    pub id: String,
    /// Marker number shown on the pin.
    pub number: u32,
    /// Label heading.
    pub title: String,
    /// Body text, present only on the active label.
    pub description: Option<String>,
    /// Projected anchor in pixels, origin top-left.
    pub screen_position: Vec2,
    /// Size multiplier in `(0, 1]`.
    pub scale: f32,
    /// Whether the anchor is inside the view.
    pub visible: bool,
    /// Whether this is the selected annotation.
    pub active: bool,
}

/// Label size multiplier for an anchor `distance` away from the camera.
///
/// Labels keep full size up to `divisor` units and shrink inversely
/// beyond it; they never grow past 1.
#[must_use]
pub fn label_scale(distance: f32, divisor: f32) -> f32 {
    let divisor = divisor.max(f32::EPSILON);
    1.0 / (distance / divisor).max(1.0)
}

/// Computes [`LabelLayout`]s for the registry each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationOverlay {
    show: bool,
    label_distance_divisor: f32,
}

impl AnnotationOverlay {
    /// Overlay configured from the display options.
    #[must_use]
    pub fn from_options(options: &DisplayOptions) -> Self {
        Self {
            show: options.show_annotations,
            label_distance_divisor: options.label_distance_divisor,
        }
    }

    /// Whether labels are shown at all.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.show
    }

    /// Show or hide every label.
    pub fn set_shown(&mut self, show: bool) {
        self.show = show;
    }

    /// Layouts for every annotation in navigation order, or nothing when
    /// the overlay is hidden.
    #[must_use]
    pub fn layout(
        &self,
        registry: &AnnotationRegistry,
        camera: &Camera,
        viewport: Viewport,
        active: Option<usize>,
    ) -> Vec<LabelLayout> {
        if !self.show {
            return Vec::new();
        }
        let frustum = camera.frustum();
        registry
            .ordered()
            .iter()
            .enumerate()
            .map(|(index, annotation)| {
                let is_active = active == Some(index);
                let projected = frustum
                    .contains_point(annotation.anchor)
                    .then(|| camera.project_to_screen(annotation.anchor, viewport))
                    .flatten();
                LabelLayout {
                    id: annotation.id.clone(),
                    number: annotation.order,
                    title: annotation.title.clone(),
                    description: is_active.then(|| annotation.description.clone()),
                    screen_position: projected.unwrap_or(Vec2::ZERO),
                    scale: label_scale(
                        camera.distance_to(annotation.anchor),
                        self.label_distance_divisor,
                    ),
                    visible: projected.is_some(),
                    active: is_active,
                }
            })
            .collect()
    }
}

impl Default for AnnotationOverlay {
    fn default() -> Self {
        Self::from_options(&DisplayOptions::default())
    }
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Renders label layouts with some UI technology (DOM, immediate-mode UI,
/// a log). Implementations own the elements and any listeners attached to
/// them; `unmount` must release both.
pub trait LabelPresenter {
    /// Create the element for a label not currently shown.
    fn mount(&mut self, label: &LabelLayout);
    /// Reposition/restyle an already mounted label.
    fn update(&mut self, label: &LabelLayout);
    /// Destroy the element for `id` and detach its listeners.
    fn unmount(&mut self, id: &str);
}

/// Mount/update/unmount bookkeeping between successive layout passes.
#[derive(Debug, Default)]
pub struct LabelReconciler {
    mounted: Vec<String>,
}

impl LabelReconciler {
    /// Reconciler with nothing mounted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the presenter in line with `labels`: unmount labels that
    /// disappeared, mount new ones, update the rest.
    pub fn sync<P: LabelPresenter + ?Sized>(
        &mut self,
        presenter: &mut P,
        labels: &[LabelLayout],
    ) {
        self.mounted.retain(|id| {
            let keep = labels.iter().any(|l| &l.id == id);
            if !keep {
                presenter.unmount(id);
            }
            keep
        });
        for label in labels {
            if self.mounted.contains(&label.id) {
                presenter.update(label);
            } else {
                presenter.mount(label);
                self.mounted.push(label.id.clone());
            }
        }
    }

    /// Unmount everything.
    pub fn clear<P: LabelPresenter + ?Sized>(&mut self, presenter: &mut P) {
        for id in self.mounted.drain(..) {
            presenter.unmount(&id);
        }
    }

    /// Ids currently mounted, in mount order.
    #[must_use]
    pub fn mounted(&self) -> &[String] {
        &self.mounted
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::annotation::registry::test_annotation;
    use crate::options::CameraOptions;

    #[derive(Default)]
    struct Recorder {
        live: Vec<String>,
        mounts: usize,
        updates: usize,
        unmounts: usize,
    }

    impl LabelPresenter for Recorder {
        fn mount(&mut self, label: &LabelLayout) {
            self.mounts += 1;
            self.live.push(label.id.clone());
        }

        fn update(&mut self, _label: &LabelLayout) {
            self.updates += 1;
        }

        fn unmount(&mut self, id: &str) {
            self.unmounts += 1;
            self.live.retain(|l| l != id);
        }
    }

    fn registry() -> AnnotationRegistry {
        let mut front = test_annotation("front", 1);
        front.anchor = Vec3::new(0.0, 0.0, 2.0);
        let mut behind = test_annotation("behind", 2);
        behind.anchor = Vec3::new(0.0, 0.0, 40.0);
        let mut far = test_annotation("far", 3);
        far.anchor = Vec3::new(0.0, 0.0, -30.0);
        AnnotationRegistry::new(vec![front, behind, far]).unwrap()
    }

    fn camera() -> Camera {
        let mut camera = Camera::from_options(&CameraOptions::default(), 1.0);
        camera.eye = Vec3::new(0.0, 0.0, 12.0);
        camera.target = Vec3::ZERO;
        camera
    }

    #[test]
    fn test_scale_never_exceeds_one() {
        assert_eq!(label_scale(3.0, 10.0), 1.0);
        assert_eq!(label_scale(10.0, 10.0), 1.0);
        assert!((label_scale(20.0, 10.0) - 0.5).abs() < 1e-6);
        assert!((label_scale(40.0, 10.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_layout_projects_and_scales() {
        let overlay = AnnotationOverlay::default();
        let viewport = Viewport::new(800.0, 800.0);
        let labels = overlay.layout(&registry(), &camera(), viewport, Some(2));
        assert_eq!(labels.len(), 3);

        let front = &labels[0];
        assert!(front.visible);
        assert!((front.screen_position - Vec2::new(400.0, 400.0)).length() < 1e-3);
        assert_eq!(front.scale, 1.0);
        assert!(!front.active);
        assert!(front.description.is_none());

        // behind the eye
        assert!(!labels[1].visible);

        let far = &labels[2];
        assert!(far.visible);
        assert!(far.active);
        assert!(far.description.is_some());
        assert!((far.scale - 1.0 / 4.2).abs() < 1e-4);
    }

    #[test]
    fn test_hidden_overlay_produces_nothing() {
        let mut overlay = AnnotationOverlay::default();
        overlay.set_shown(false);
        let labels =
            overlay.layout(&registry(), &camera(), Viewport::new(10.0, 10.0), None);
        assert!(labels.is_empty());
    }

    #[test]
    fn test_reconciler_mounts_once_and_updates_after() {
        let overlay = AnnotationOverlay::default();
        let reg = registry();
        let viewport = Viewport::new(800.0, 600.0);
        let mut presenter = Recorder::default();
        let mut reconciler = LabelReconciler::new();

        for frame in 0..5 {
            let active = (frame % 2 == 0).then_some(0);
            let labels = overlay.layout(&reg, &camera(), viewport, active);
            reconciler.sync(&mut presenter, &labels);
        }
        assert_eq!(presenter.mounts, 3);
        assert_eq!(presenter.updates, 12);
        assert_eq!(presenter.unmounts, 0);
        assert_eq!(reconciler.mounted().len(), 3);
    }

    #[test]
    fn test_repeated_show_hide_cycles_do_not_leak() {
        let mut overlay = AnnotationOverlay::default();
        let reg = registry();
        let viewport = Viewport::new(800.0, 600.0);
        let mut presenter = Recorder::default();
        let mut reconciler = LabelReconciler::new();

        for _ in 0..4 {
            overlay.set_shown(true);
            let labels = overlay.layout(&reg, &camera(), viewport, None);
            reconciler.sync(&mut presenter, &labels);
            assert_eq!(presenter.live.len(), 3);

            overlay.set_shown(false);
            let labels = overlay.layout(&reg, &camera(), viewport, None);
            reconciler.sync(&mut presenter, &labels);
            assert!(presenter.live.is_empty());
        }
        assert_eq!(presenter.mounts, presenter.unmounts);
    }

    #[test]
    fn test_clear_unmounts_everything() {
        let overlay = AnnotationOverlay::default();
        let labels = overlay.layout(
            &registry(),
            &camera(),
            Viewport::new(100.0, 100.0),
            None,
        );
        let mut presenter = Recorder::default();
        let mut reconciler = LabelReconciler::new();
        reconciler.sync(&mut presenter, &labels);
        reconciler.clear(&mut presenter);
        assert!(presenter.live.is_empty());
        assert!(reconciler.mounted().is_empty());
    }
}
