use std::fmt;

/// Keyboard key identifier.
///
/// Only the keys the demos react to have names; everything else arrives as
/// `Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True for auto-repeat presses.
        repeat: bool,
    },

    /// Window focus change.
    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Unknown(code) => write!(f, "Unknown({code:#x})"),
            other => write!(f, "{other:?}"),
        }
    }
}
