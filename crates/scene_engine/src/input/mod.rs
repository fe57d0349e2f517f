//! Input event types
//!
//! The windowing backend translates its native events into [`InputEvent`]
//! and hands them to `SceneTree::dispatch_input`. The scene core only routes
//! them; it never interprets key or button meaning.

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A letter key, stored as its uppercase ASCII character
    Letter(char),
    /// A digit key on the main row
    Digit(u8),
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Any key the backend reports by scancode only
    Other(i32),
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// Extra buttons, numbered from 4
    Other(u8),
}

/// Press state carried by key and button events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// The key or button went down
    Press,
    /// The key or button went up
    Release,
    /// The key is held and the platform emitted a repeat
    Repeat,
}

/// A discrete input event delivered to the node tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Keyboard key event
    Key {
        /// The key
        key: KeyCode,
        /// Press, release or repeat
        action: KeyAction,
    },

    /// Mouse button event
    MouseButton {
        /// The button
        button: MouseButton,
        /// Press or release
        action: KeyAction,
    },

    /// Cursor movement, in window coordinates
    MouseMotion {
        /// New X coordinate
        x: f64,
        /// New Y coordinate
        y: f64,
    },

    /// Scroll wheel or trackpad scroll
    Scroll {
        /// Horizontal scroll delta
        delta_x: f64,
        /// Vertical scroll delta
        delta_y: f64,
    },
}

impl InputEvent {
    /// Whether this event is a key or button press (repeats excluded)
    pub fn is_press(&self) -> bool {
        matches!(
            self,
            Self::Key { action: KeyAction::Press, .. }
                | Self::MouseButton { action: KeyAction::Press, .. }
        )
    }
}
