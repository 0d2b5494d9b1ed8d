//! Command dispatch and input entry points for ViewerEngine

use web_time::Instant;

use super::{ViewerCommand, ViewerEngine};
use crate::input::{InputEvent, InputProcessor};

impl ViewerEngine {
    /// Perform a command at time `now`.
    ///
    /// Invalid annotation or condition ids are logged and ignored, leaving
    /// all state unchanged. Use the typed methods
    /// ([`select_annotation`](Self::select_annotation),
    /// [`set_condition`](Self::set_condition)) to observe those errors.
    pub fn execute(&mut self, cmd: ViewerCommand, now: Instant) {
        match cmd {
            ViewerCommand::SelectAnnotation { id } => {
                if let Err(e) = self.select_annotation(&id, now) {
                    log::warn!("Ignoring selection: {e}");
                }
            }
            ViewerCommand::NextAnnotation => {
                let _ = self.select_next(now);
            }
            ViewerCommand::PreviousAnnotation => {
                let _ = self.select_previous(now);
            }
            ViewerCommand::ClearSelection => {
                let _ = self.clear_selection();
            }
            ViewerCommand::ToggleAnnotations => {
                let show = !self.options.display.show_annotations;
                self.set_show_annotations(show);
            }
            ViewerCommand::SetShowAnnotations { show } => {
                self.set_show_annotations(show);
            }
            ViewerCommand::SetCondition { id, active } => {
                if let Err(e) = self.set_condition(&id, active) {
                    log::warn!("Ignoring condition toggle: {e}");
                }
            }
            ViewerCommand::RotateCamera { delta } => {
                if !self.flights.is_flying() {
                    self.camera_controller.rotate(delta);
                }
            }
            ViewerCommand::Zoom { delta } => {
                if !self.flights.is_flying() {
                    self.camera_controller.zoom(delta);
                }
            }
        }
    }

    /// Process a platform-agnostic input event. Returns whether it
    /// produced a command.
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x, y }, now);
    /// engine.handle_input(InputEvent::Scroll { delta: 1.0 }, now);
    /// ```
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> bool {
        let Some(cmd) = self.input.handle_event(event) else {
            return false;
        };
        self.execute(cmd, now);
        true
    }

    /// Process a key press (`KeyboardEvent.code` strings such as
    /// `"ArrowRight"`). Returns whether the key was bound and the viewer
    /// had focus.
    pub fn handle_key_press(&mut self, key: &str, now: Instant) -> bool {
        let Some(cmd) = self.input.handle_key_press(key) else {
            return false;
        };
        self.execute(cmd, now);
        true
    }

    /// A label was clicked.
    pub fn handle_label_click(&mut self, id: &str, now: Instant) {
        self.execute(InputProcessor::handle_label_click(id), now);
    }
}
