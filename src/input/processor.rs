//! Converts raw platform events into viewer commands.
//!
//! The `InputProcessor` owns all transient input state (cursor position,
//! drag state, keyboard focus) and the key-binding map. It sits between
//! the host's event sources and [`ViewerEngine::execute`].
//!
//! [`ViewerEngine::execute`]: crate::engine::ViewerEngine::execute

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use crate::engine::ViewerCommand;
use crate::options::KeybindingOptions;

/// Converts raw host events into [`ViewerCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input.handle_event(event) {
///     engine.execute(cmd);
/// }
/// if let Some(cmd) = input.handle_key_press("ArrowRight") {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InputProcessor {
    /// Last known cursor position, `None` until the first move.
    cursor: Option<Vec2>,
    /// Whether the primary mouse button is held.
    mouse_pressed: bool,
    /// Whether key presses should reach the viewer.
    focused: bool,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Processor with default key bindings and focus.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            cursor: None,
            mouse_pressed: false,
            focused: true,
            key_bindings,
        }
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Replace the key bindings (e.g. after loading a preset).
    pub fn set_key_bindings(&mut self, key_bindings: KeybindingOptions) {
        self.key_bindings = key_bindings;
    }

    /// Whether the viewer currently receives key presses.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// Look up a key press. Unbound keys, and any key while the viewer is
    /// unfocused, produce nothing.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewerCommand> {
        if !self.focused {
            return None;
        }
        self.key_bindings.lookup(key).map(KeyAction::to_command)
    }

    /// A label was clicked.
    #[must_use]
    pub fn handle_label_click(id: &str) -> ViewerCommand {
        ViewerCommand::SelectAnnotation { id: id.to_owned() }
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y))
            }
            InputEvent::MouseButton { button, pressed } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = pressed;
                }
                None
            }
            InputEvent::Scroll { delta } => Some(ViewerCommand::Zoom { delta }),
            InputEvent::FocusChanged { focused } => {
                self.focused = focused;
                if !focused {
                    self.mouse_pressed = false;
                }
                None
            }
        }
    }

    /// Cursor moved: a drag with the primary button held orbits the camera.
    fn handle_cursor_moved(&mut self, pos: Vec2) -> Option<ViewerCommand> {
        let delta = self.cursor.map_or(Vec2::ZERO, |last| pos - last);
        self.cursor = Some(pos);

        (self.mouse_pressed && delta != Vec2::ZERO)
            .then_some(ViewerCommand::RotateCamera { delta })
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(pressed: bool) -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        }
    }

    #[test]
    fn test_arrow_keys_navigate() {
        let input = InputProcessor::new();
        assert_eq!(
            input.handle_key_press("ArrowRight"),
            Some(ViewerCommand::NextAnnotation)
        );
        assert_eq!(
            input.handle_key_press("ArrowLeft"),
            Some(ViewerCommand::PreviousAnnotation)
        );
        assert_eq!(input.handle_key_press("KeyZ"), None);
    }

    #[test]
    fn test_unfocused_viewer_ignores_keys() {
        let mut input = InputProcessor::new();
        assert!(input
            .handle_event(InputEvent::FocusChanged { focused: false })
            .is_none());
        assert_eq!(input.handle_key_press("ArrowRight"), None);

        let _ = input.handle_event(InputEvent::FocusChanged { focused: true });
        assert!(input.handle_key_press("ArrowRight").is_some());
    }

    #[test]
    fn test_rebinding_changes_lookup() {
        let mut bindings = KeybindingOptions::default();
        bindings.bind(KeyAction::NextAnnotation, "KeyD");
        let input = InputProcessor::with_key_bindings(bindings);
        assert_eq!(
            input.handle_key_press("KeyD"),
            Some(ViewerCommand::NextAnnotation)
        );
        assert_eq!(input.handle_key_press("ArrowRight"), None);
    }

    #[test]
    fn test_drag_rotates_only_while_pressed() {
        let mut input = InputProcessor::new();
        assert!(input
            .handle_event(InputEvent::CursorMoved { x: 10.0, y: 10.0 })
            .is_none());
        assert!(input
            .handle_event(InputEvent::CursorMoved { x: 15.0, y: 10.0 })
            .is_none());

        let _ = input.handle_event(press(true));
        assert_eq!(
            input.handle_event(InputEvent::CursorMoved { x: 20.0, y: 8.0 }),
            Some(ViewerCommand::RotateCamera {
                delta: Vec2::new(5.0, -2.0)
            })
        );

        let _ = input.handle_event(press(false));
        assert!(input
            .handle_event(InputEvent::CursorMoved { x: 30.0, y: 8.0 })
            .is_none());
    }

    #[test]
    fn test_scroll_zooms_and_click_selects() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta: -1.5 }),
            Some(ViewerCommand::Zoom { delta: -1.5 })
        );
        assert_eq!(
            InputProcessor::handle_label_click("lens"),
            ViewerCommand::SelectAnnotation { id: "lens".into() }
        );
    }
}
