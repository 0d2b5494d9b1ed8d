/// Platform-agnostic input events.
///
/// Hosts translate their native window/DOM events into these and feed
/// them to an [`InputProcessor`](super::InputProcessor), which turns them
/// into [`ViewerCommand`](crate::engine::ViewerCommand)s.
///
/// # Example
///
/// ```ignore
/// if let Some(cmd) = input.handle_event(InputEvent::Scroll { delta: 1.0 }) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount.
        delta: f32,
    },
    /// The viewer gained or lost keyboard focus.
    FocusChanged {
        /// Whether the viewer now has focus.
        focused: bool,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}
