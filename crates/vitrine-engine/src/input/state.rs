use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Held-key state for a window.
///
/// Written by the event handler, read by the frame step; both run on the event
/// loop thread, so the last event before a frame wins.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window has keyboard focus.
    pub focused: bool,

    /// Keys currently held.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an event and records transitions in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Release events are not delivered while unfocused.
                    for key in self.keys_down.drain() {
                        frame.keys_released.insert(key);
                    }
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}
