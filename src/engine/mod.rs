//! The viewer engine: owns every subsystem, dispatches commands and
//! produces one [`Frame`] per host tick.

mod input;
mod queries;

/// The viewer's command vocabulary.
pub mod command;

pub use command::ViewerCommand;
pub use queries::NavigationView;
use web_time::Instant;

use crate::annotation::{
    AnnotationOverlay, AnnotationRegistry, LabelLayout, LabelPresenter,
    LabelReconciler, SelectionController, SelectionEvent,
};
use crate::camera::controller::CameraController;
use crate::camera::core::{Camera, Viewport};
use crate::camera::flight::{CameraFlightController, FlightStatus};
use crate::condition::{ConditionOverlayManager, MarkerInstance};
use crate::error::EyeViewError;
use crate::input::InputProcessor;
use crate::options::Options;
use crate::scene::{Material, ModelState, SceneGraph};
use crate::util::frame_timing::FrameTiming;

/// Target FPS limit
const TARGET_FPS: u32 = 60;

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Camera pose after this frame's flight step.
    pub camera: Camera,
    /// Drawing-surface size the labels were laid out for.
    pub viewport: Viewport,
    /// What the camera flight did this frame.
    pub flight: FlightStatus,
    /// Annotation labels (empty while hidden or while the model loads).
    pub labels: Vec<LabelLayout>,
    /// Condition markers to draw this frame.
    pub markers: Vec<MarkerInstance>,
    /// Material currently applied to the lens node.
    pub lens_material: Material,
    /// Clear color (linear RGB).
    pub background: [f32; 3],
    /// Whether the model-loading placeholder should be drawn.
    pub placeholder: bool,
    /// Selection changes since the previous frame, oldest first.
    pub selection_events: Vec<SelectionEvent>,
}

/// The eye viewer's state and frame loop, independent of any windowing
/// or UI toolkit.
///
/// # Construction
///
/// Use [`ViewerEngine::new`] with a validated [`AnnotationRegistry`], or
/// [`ViewerEngine::with_eye_registry`] for the built-in eye annotations.
///
/// # Frame loop
///
/// Each frame, call [`update`](Self::update) with the current time and
/// draw the returned [`Frame`]. Forward input through
/// [`handle_input`](Self::handle_input),
/// [`handle_key_press`](Self::handle_key_press) and
/// [`execute`](Self::execute). Report the model loader's outcome with
/// [`set_model`](Self::set_model).
pub struct ViewerEngine {
    /// Ordered, validated annotations.
    registry: AnnotationRegistry,
    /// Active annotation.
    selection: SelectionController,
    /// Camera flights toward selected annotations.
    flights: CameraFlightController,
    /// Orbit camera and viewport.
    pub camera_controller: CameraController,
    /// Label layout parameters and the show flag.
    overlay: AnnotationOverlay,
    /// Mounted-label bookkeeping for [`present_labels`](Self::present_labels).
    labels: LabelReconciler,
    /// Condition flags and their visuals.
    conditions: ConditionOverlayManager,
    /// Model loader outcome.
    model: ModelState,
    /// Raw event → command translation.
    pub input: InputProcessor,
    /// Runtime options.
    options: Options,
    /// Per-frame timing and FPS tracking.
    frame_timing: FrameTiming,
    /// Origin of the marker animation clock.
    clock_start: Instant,
}

impl ViewerEngine {
    /// Engine over `registry`, with the model still loading.
    #[must_use]
    pub fn new(
        registry: AnnotationRegistry,
        options: Options,
        viewport: Viewport,
        now: Instant,
    ) -> Self {
        log::info!("Viewer started with {} annotations", registry.len());
        Self {
            selection: SelectionController::new(),
            flights: CameraFlightController::from_options(&options.flight),
            camera_controller: CameraController::new(&options.camera, viewport),
            overlay: AnnotationOverlay::from_options(&options.display),
            labels: LabelReconciler::new(),
            conditions: ConditionOverlayManager::new(&options.effects),
            model: ModelState::Loading,
            input: InputProcessor::with_key_bindings(options.keybindings.clone()),
            frame_timing: FrameTiming::new(TARGET_FPS, now),
            clock_start: now,
            registry,
            options,
        }
    }

    /// Engine over the built-in eye annotations.
    ///
    /// # Errors
    ///
    /// Returns [`EyeViewError::Configuration`] if the embedded registry is
    /// invalid.
    pub fn with_eye_registry(
        options: Options,
        viewport: Viewport,
        now: Instant,
    ) -> Result<Self, EyeViewError> {
        Ok(Self::new(AnnotationRegistry::eye()?, options, viewport, now))
    }

    // =========================================================================
    // Annotations
    // =========================================================================

    /// Activate the annotation `id` and fly the camera to its framing
    /// target. Re-selecting the active annotation flies again.
    ///
    /// # Errors
    ///
    /// Returns [`EyeViewError::NotFound`] for unknown ids; selection and
    /// camera are left unchanged.
    pub fn select_annotation(
        &mut self,
        id: &str,
        now: Instant,
    ) -> Result<(), EyeViewError> {
        let annotation = self.selection.select_by_id(&self.registry, id)?;
        self.flights.start_flight(
            self.camera_controller.camera.eye,
            annotation.camera_target,
            annotation.anchor,
            now,
        );
        Ok(())
    }

    /// Step forward through the tour. Returns whether anything was
    /// selected (false only for an empty registry).
    pub fn select_next(&mut self, now: Instant) -> bool {
        let Some(annotation) = self.selection.select_next(&self.registry) else {
            return false;
        };
        self.flights.start_flight(
            self.camera_controller.camera.eye,
            annotation.camera_target,
            annotation.anchor,
            now,
        );
        true
    }

    /// Step backward through the tour. Returns whether anything was
    /// selected (false only for an empty registry).
    pub fn select_previous(&mut self, now: Instant) -> bool {
        let Some(annotation) = self.selection.select_previous(&self.registry)
        else {
            return false;
        };
        self.flights.start_flight(
            self.camera_controller.camera.eye,
            annotation.camera_target,
            annotation.anchor,
            now,
        );
        true
    }

    /// Deselect and stop any flight, leaving the camera where it is.
    /// Returns whether anything was selected.
    pub fn clear_selection(&mut self) -> bool {
        if self.flights.stop() {
            log::debug!("Camera flight stopped by clear selection");
        }
        self.selection.clear()
    }

    /// Show or hide every annotation label.
    pub fn set_show_annotations(&mut self, show: bool) {
        self.overlay.set_shown(show);
        self.options.display.show_annotations = show;
    }

    /// Take the selection notifications queued since the last
    /// [`update`](Self::update), oldest first. `update` drains the queue
    /// into [`Frame::selection_events`] on its own.
    pub fn drain_selection_events(&mut self) -> Vec<SelectionEvent> {
        self.selection.drain_events()
    }

    // =========================================================================
    // Conditions
    // =========================================================================

    /// Toggle a condition and refresh the lens material on the loaded
    /// model. Returns whether the flag changed.
    ///
    /// # Errors
    ///
    /// Returns [`EyeViewError::UnknownCondition`] for ids outside the
    /// known set; nothing changes.
    pub fn set_condition(
        &mut self,
        id: &str,
        active: bool,
    ) -> Result<bool, EyeViewError> {
        let changed = self.conditions.set_condition(id, active)?;
        if changed {
            self.apply_lens_material();
        }
        Ok(changed)
    }

    // =========================================================================
    // Model
    // =========================================================================

    /// Report the model loader's outcome. A loaded scene immediately gets
    /// the lens material for the current condition flags.
    pub fn set_model(&mut self, result: Result<SceneGraph, EyeViewError>) {
        match result {
            Ok(scene) => {
                log::info!("Eye model ready ({} nodes)", scene.len());
                self.model = ModelState::Ready(scene);
                self.apply_lens_material();
            }
            Err(e) => {
                log::error!("Eye model failed to load: {e}");
                self.model = ModelState::Failed(e.to_string());
            }
        }
    }

    fn apply_lens_material(&mut self) {
        if let Some(scene) = self.model.scene_mut() {
            let _ = self.conditions.apply_to_scene(scene);
        }
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Update the viewport and camera aspect ratio.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera_controller.resize(width, height);
    }

    /// Advance flights and animations to `now` and describe the frame.
    pub fn update(&mut self, now: Instant) -> Frame {
        let flight = self
            .flights
            .tick(&mut self.camera_controller.camera, now);
        self.frame_timing.end_frame(now);

        let camera = self.camera_controller.camera;
        let viewport = self.camera_controller.viewport();
        let labels = if self.model.is_ready() {
            self.overlay.layout(
                &self.registry,
                &camera,
                viewport,
                self.selection.active_index(),
            )
        } else {
            Vec::new()
        };
        let elapsed = now.saturating_duration_since(self.clock_start);

        Frame {
            camera,
            viewport,
            flight,
            labels,
            markers: self.conditions.markers(elapsed.as_secs_f32()),
            lens_material: self.conditions.lens_material(),
            background: self.options.display.background_color,
            placeholder: self.placeholder_visible(),
            selection_events: self.selection.drain_events(),
        }
    }

    /// Mount, update and unmount labels on `presenter` to match `frame`.
    pub fn present_labels<P: LabelPresenter + ?Sized>(
        &mut self,
        presenter: &mut P,
        frame: &Frame,
    ) {
        self.labels.sync(presenter, &frame.labels);
    }

    /// Unmount every label from `presenter` (viewer teardown).
    pub fn teardown<P: LabelPresenter + ?Sized>(&mut self, presenter: &mut P) {
        self.labels.clear(presenter);
    }

    // =========================================================================
    // Options
    // =========================================================================

    /// Current runtime options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the runtime options and push them into every subsystem.
    /// The camera pose, selection and condition flags are kept.
    pub fn set_options(&mut self, options: Options) {
        self.camera_controller.apply_options(&options.camera);
        self.flights.configure(&options.flight);
        self.overlay = AnnotationOverlay::from_options(&options.display);
        self.conditions.apply_options(&options.effects);
        self.input.set_key_bindings(options.keybindings.clone());
        self.options = options;
        self.apply_lens_material();
    }

    /// Load options from a TOML preset file and apply them.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed; the current
    /// options stay in effect.
    pub fn load_preset(&mut self, path: &std::path::Path) -> Result<(), EyeViewError> {
        let options = Options::load(path)?;
        log::info!("Loaded options preset {}", path.display());
        self.set_options(options);
        Ok(())
    }
}
