use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events the input subsystem does not track.
pub(crate) fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event.physical_key),
            state: map_state(event.state),
            repeat: event.repeat,
        }),

        _ => None,
    }
}

fn map_state(st: ElementState) -> KeyState {
    match st {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Space => Key::Space,

            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,

            KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
            KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
            KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
            KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode carries no stable numeric in winit 0.30.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
