//! Keyboard input.
//!
//! Public API is platform-agnostic; the window runtime translates winit
//! events into `InputEvent`s and feeds them to the window's `InputState`.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
