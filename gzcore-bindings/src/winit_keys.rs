//! Translation of winit input events into engine key codes.
//!
//! Keyboard keys map by physical position onto the DirectInput scan-code
//! layout used by the key-name table, so bindings stay positional across
//! keyboard layouts.

use crate::dispatcher::{EventType, InputEvent};
use crate::key_names::{
    FIRST_MOUSE_BUTTON, KEY_MWHEELDOWN, KEY_MWHEELLEFT, KEY_MWHEELRIGHT, KEY_MWHEELUP, KeyCode,
    NUM_MOUSE_BUTTONS,
};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};

/// Engine key code for a physical keyboard key.
pub fn physical_key_code(key: PhysicalKey) -> Option<KeyCode> {
    match key {
        PhysicalKey::Code(code) => keyboard_code(code),
        PhysicalKey::Unidentified(_) => None,
    }
}

/// Engine key code for a winit key code, if the key has a slot.
pub fn keyboard_code(key: WinitKey) -> Option<KeyCode> {
    let code = match key {
        WinitKey::Escape => 0x01,
        WinitKey::Digit1 => 0x02,
        WinitKey::Digit2 => 0x03,
        WinitKey::Digit3 => 0x04,
        WinitKey::Digit4 => 0x05,
        WinitKey::Digit5 => 0x06,
        WinitKey::Digit6 => 0x07,
        WinitKey::Digit7 => 0x08,
        WinitKey::Digit8 => 0x09,
        WinitKey::Digit9 => 0x0A,
        WinitKey::Digit0 => 0x0B,
        WinitKey::Minus => 0x0C,
        WinitKey::Equal => 0x0D,
        WinitKey::Backspace => 0x0E,
        WinitKey::Tab => 0x0F,
        WinitKey::KeyQ => 0x10,
        WinitKey::KeyW => 0x11,
        WinitKey::KeyE => 0x12,
        WinitKey::KeyR => 0x13,
        WinitKey::KeyT => 0x14,
        WinitKey::KeyY => 0x15,
        WinitKey::KeyU => 0x16,
        WinitKey::KeyI => 0x17,
        WinitKey::KeyO => 0x18,
        WinitKey::KeyP => 0x19,
        WinitKey::BracketLeft => 0x1A,
        WinitKey::BracketRight => 0x1B,
        WinitKey::Enter => 0x1C,
        WinitKey::ControlLeft => 0x1D,
        WinitKey::KeyA => 0x1E,
        WinitKey::KeyS => 0x1F,
        WinitKey::KeyD => 0x20,
        WinitKey::KeyF => 0x21,
        WinitKey::KeyG => 0x22,
        WinitKey::KeyH => 0x23,
        WinitKey::KeyJ => 0x24,
        WinitKey::KeyK => 0x25,
        WinitKey::KeyL => 0x26,
        WinitKey::Semicolon => 0x27,
        WinitKey::Quote => 0x28,
        WinitKey::Backquote => 0x29,
        WinitKey::ShiftLeft => 0x2A,
        WinitKey::Backslash => 0x2B,
        WinitKey::KeyZ => 0x2C,
        WinitKey::KeyX => 0x2D,
        WinitKey::KeyC => 0x2E,
        WinitKey::KeyV => 0x2F,
        WinitKey::KeyB => 0x30,
        WinitKey::KeyN => 0x31,
        WinitKey::KeyM => 0x32,
        WinitKey::Comma => 0x33,
        WinitKey::Period => 0x34,
        WinitKey::Slash => 0x35,
        WinitKey::ShiftRight => 0x36,
        WinitKey::NumpadMultiply => 0x37,
        WinitKey::AltLeft => 0x38,
        WinitKey::Space => 0x39,
        WinitKey::CapsLock => 0x3A,
        WinitKey::F1 => 0x3B,
        WinitKey::F2 => 0x3C,
        WinitKey::F3 => 0x3D,
        WinitKey::F4 => 0x3E,
        WinitKey::F5 => 0x3F,
        WinitKey::F6 => 0x40,
        WinitKey::F7 => 0x41,
        WinitKey::F8 => 0x42,
        WinitKey::F9 => 0x43,
        WinitKey::F10 => 0x44,
        WinitKey::NumLock => 0x45,
        WinitKey::ScrollLock => 0x46,
        WinitKey::Numpad7 => 0x47,
        WinitKey::Numpad8 => 0x48,
        WinitKey::Numpad9 => 0x49,
        WinitKey::NumpadSubtract => 0x4A,
        WinitKey::Numpad4 => 0x4B,
        WinitKey::Numpad5 => 0x4C,
        WinitKey::Numpad6 => 0x4D,
        WinitKey::NumpadAdd => 0x4E,
        WinitKey::Numpad1 => 0x4F,
        WinitKey::Numpad2 => 0x50,
        WinitKey::Numpad3 => 0x51,
        WinitKey::Numpad0 => 0x52,
        WinitKey::NumpadDecimal => 0x53,
        WinitKey::IntlBackslash => 0x56,
        WinitKey::F11 => 0x57,
        WinitKey::F12 => 0x58,
        WinitKey::F13 => 0x64,
        WinitKey::F14 => 0x65,
        WinitKey::F15 => 0x66,
        WinitKey::F16 => 0x67,
        WinitKey::KanaMode => 0x70,
        WinitKey::IntlRo => 0x73,
        WinitKey::Convert => 0x79,
        WinitKey::NonConvert => 0x7B,
        WinitKey::IntlYen => 0x7D,
        WinitKey::NumpadEqual => 0x8D,
        WinitKey::NumpadEnter => 0x9C,
        WinitKey::ControlRight => 0x9D,
        WinitKey::AudioVolumeMute => 0xA0,
        WinitKey::LaunchApp2 => 0xA1,
        WinitKey::MediaPlayPause => 0xA2,
        WinitKey::MediaStop => 0xA4,
        WinitKey::AudioVolumeDown => 0xAE,
        WinitKey::AudioVolumeUp => 0xB0,
        WinitKey::BrowserHome => 0xB2,
        WinitKey::NumpadComma => 0xB3,
        WinitKey::NumpadDivide => 0xB5,
        WinitKey::PrintScreen => 0xB7,
        WinitKey::AltRight => 0xB8,
        WinitKey::Pause => 0xC5,
        WinitKey::Home => 0xC7,
        WinitKey::ArrowUp => 0xC8,
        WinitKey::PageUp => 0xC9,
        WinitKey::ArrowLeft => 0xCB,
        WinitKey::ArrowRight => 0xCD,
        WinitKey::End => 0xCF,
        WinitKey::ArrowDown => 0xD0,
        WinitKey::PageDown => 0xD1,
        WinitKey::Insert => 0xD2,
        WinitKey::Delete => 0xD3,
        WinitKey::SuperLeft => 0xDB,
        WinitKey::SuperRight => 0xDC,
        WinitKey::ContextMenu => 0xDD,
        WinitKey::Power => 0xDE,
        WinitKey::Sleep => 0xDF,
        WinitKey::WakeUp => 0xE3,
        WinitKey::BrowserSearch => 0xE5,
        WinitKey::BrowserFavorites => 0xE6,
        WinitKey::BrowserRefresh => 0xE7,
        WinitKey::BrowserStop => 0xE8,
        WinitKey::BrowserForward => 0xE9,
        WinitKey::BrowserBack => 0xEA,
        WinitKey::LaunchApp1 => 0xEB,
        WinitKey::LaunchMail => 0xEC,
        WinitKey::MediaSelect => 0xED,
        _ => return None,
    };
    Some(code)
}

/// Engine key code for a mouse button (`mouse1`..`mouse8`).
pub fn mouse_button_code(button: MouseButton) -> Option<KeyCode> {
    let index = match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
        MouseButton::Other(n) if (5..NUM_MOUSE_BUTTONS as u16).contains(&n) => n,
        MouseButton::Other(_) => return None,
    };
    Some(FIRST_MOUSE_BUTTON + index)
}

/// Down/up event for a key or button state change.
pub fn key_event(code: KeyCode, state: ElementState) -> InputEvent {
    match state {
        ElementState::Pressed => InputEvent::key_down(code),
        ElementState::Released => InputEvent::key_up(code),
    }
}

/// A scroll delta becomes a down/up pair per wheel direction, since wheel
/// "keys" have no held state.
pub fn scroll_events(delta: MouseScrollDelta) -> Vec<InputEvent> {
    let (x, y) = match delta {
        MouseScrollDelta::LineDelta(x, y) => (f64::from(x), f64::from(y)),
        MouseScrollDelta::PixelDelta(pos) => (pos.x, pos.y),
    };

    let mut events = Vec::new();
    let mut click = |code: KeyCode| {
        events.push(InputEvent::key_down(code));
        events.push(InputEvent::key_up(code));
    };
    if y > 0.0 {
        click(KEY_MWHEELUP);
    } else if y < 0.0 {
        click(KEY_MWHEELDOWN);
    }
    if x > 0.0 {
        click(KEY_MWHEELRIGHT);
    } else if x < 0.0 {
        click(KEY_MWHEELLEFT);
    }
    events
}

/// True for events the dispatcher acts on.
pub fn is_key_event(event: &InputEvent) -> bool {
    event.kind != EventType::Other
}
