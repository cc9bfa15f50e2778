//! Key event → command dispatch with double-click detection.
//!
//! Every key has its own state: idle, armed (a down event was seen and the
//! double-click window is open), or latched (the second down arrived in
//! time and the matching up event still has to resolve through the
//! double-click table).

use crate::key_names::{KeyCode, NUM_KEYBOARD_KEYS, NUM_KEYS};
use crate::table::BindingTable;
use std::time::Instant;

/// Default double-click window in milliseconds.
pub const DOUBLE_CLICK_MS: u64 = 571;

/// Marker bit set on a [`KeyTag`] when the command came from a double click.
pub const KEY_DBLCLICKED: u16 = 0x8000;

/// Kind of an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    KeyDown,
    KeyUp,
    /// Mouse motion, joystick axis updates and anything else with no
    /// binding semantics.
    Other,
}

/// A raw input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: EventType,
    /// Key code; anything outside the key space is ignored.
    pub data1: i32,
}

impl InputEvent {
    pub fn key_down(code: KeyCode) -> Self {
        Self {
            kind: EventType::KeyDown,
            data1: i32::from(code),
        }
    }

    pub fn key_up(code: KeyCode) -> Self {
        Self {
            kind: EventType::KeyUp,
            data1: i32::from(code),
        }
    }
}

/// The key that triggered a command, with the double-click marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyTag(pub u16);

impl KeyTag {
    pub fn new(code: KeyCode, double_click: bool) -> Self {
        if double_click {
            Self(code | KEY_DBLCLICKED)
        } else {
            Self(code)
        }
    }

    pub fn code(self) -> KeyCode {
        self.0 & (KEY_DBLCLICKED - 1)
    }

    pub fn is_double_click(self) -> bool {
        self.0 & KEY_DBLCLICKED != 0
    }
}

/// Receiver of resolved command strings.
pub trait CommandSink {
    fn add_command(&mut self, command: &str, key: KeyTag);
}

impl CommandSink for Vec<(String, KeyTag)> {
    fn add_command(&mut self, command: &str, key: KeyTag) {
        self.push((command.to_string(), key));
    }
}

/// Millisecond time source independent of game time.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Observable state of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Idle,
    /// Open double-click window, closing at the given time.
    Armed { until: u64 },
    Latched,
}

/// Per-key expiry times and one latched bit per key.
#[derive(Debug, Clone)]
struct DoubleClickState {
    expiry: Vec<u64>,
    latched: Vec<u8>,
}

impl DoubleClickState {
    fn new() -> Self {
        Self {
            expiry: vec![0; NUM_KEYS],
            latched: vec![0; NUM_KEYS.div_ceil(8)],
        }
    }

    fn is_latched(&self, code: usize) -> bool {
        self.latched[code >> 3] & (1 << (code & 7)) != 0
    }

    fn set_latched(&mut self, code: usize, on: bool) {
        let mask = 1 << (code & 7);
        if on {
            self.latched[code >> 3] |= mask;
        } else {
            self.latched[code >> 3] &= !mask;
        }
    }

    fn clear(&mut self) {
        self.expiry.fill(0);
        self.latched.fill(0);
    }
}

/// Resolves key events to commands.
#[derive(Debug, Clone)]
pub struct InputDispatcher<C: Clock = MonotonicClock> {
    clock: C,
    window_ms: u64,
    chat_mode: bool,
    state: DoubleClickState,
}

impl Default for InputDispatcher<MonotonicClock> {
    fn default() -> Self {
        Self::with_clock(MonotonicClock::default())
    }
}

impl InputDispatcher<MonotonicClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> InputDispatcher<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            window_ms: DOUBLE_CLICK_MS,
            chat_mode: false,
            state: DoubleClickState::new(),
        }
    }

    pub fn set_double_click_window(&mut self, ms: u64) {
        self.window_ms = ms;
    }

    pub fn double_click_window(&self) -> u64 {
        self.window_ms
    }

    /// While chat mode is on, only keyboard bindings (codes below 256) fire.
    pub fn set_chat_mode(&mut self, on: bool) {
        self.chat_mode = on;
    }

    pub fn chat_mode(&self) -> bool {
        self.chat_mode
    }

    /// Forget all double-click state.
    pub fn reset(&mut self) {
        self.state.clear();
    }

    /// State of `code` as seen at time `now`.
    pub fn key_state(&self, code: KeyCode, now: u64) -> KeyState {
        let index = code as usize;
        if index >= NUM_KEYS {
            return KeyState::Idle;
        }
        if self.state.is_latched(index) {
            KeyState::Latched
        } else if self.state.expiry[index] > now {
            KeyState::Armed {
                until: self.state.expiry[index],
            }
        } else {
            KeyState::Idle
        }
    }

    /// Dispatch `event` at the clock's current time.
    pub fn dispatch(
        &mut self,
        event: &InputEvent,
        binds: &BindingTable,
        double_binds: Option<&BindingTable>,
        sink: &mut dyn CommandSink,
    ) -> bool {
        let now = self.clock.now_ms();
        self.dispatch_at(now, event, binds, double_binds, sink)
    }

    /// Dispatch `event` as if it happened at `now` milliseconds.
    ///
    /// Returns `true` if a command was submitted to `sink`. Without a
    /// double-click table every event resolves through `binds`.
    pub fn dispatch_at(
        &mut self,
        now: u64,
        event: &InputEvent,
        binds: &BindingTable,
        double_binds: Option<&BindingTable>,
        sink: &mut dyn CommandSink,
    ) -> bool {
        let is_down = match event.kind {
            EventType::KeyDown => true,
            EventType::KeyUp => false,
            EventType::Other => return false,
        };
        let Ok(code) = KeyCode::try_from(event.data1) else {
            return false;
        };
        let index = code as usize;
        if index >= NUM_KEYS {
            return false;
        }

        let mut double_click = false;
        let mut binding = match double_binds {
            Some(double) if is_down && self.state.expiry[index] > now => {
                self.state.set_latched(index, true);
                double_click = true;
                double.binding(code)
            }
            _ if is_down => {
                self.state.expiry[index] = now + self.window_ms;
                binds.binding(code)
            }
            Some(double) if self.state.is_latched(index) => {
                self.state.set_latched(index, false);
                self.state.expiry[index] = 0;
                double_click = true;
                double.binding(code)
            }
            _ => binds.binding(code),
        };

        if binding.is_empty() {
            binding = binds.binding(code);
            double_click = false;
        }

        if binding.is_empty() || (self.chat_mode && index >= NUM_KEYBOARD_KEYS) {
            return false;
        }

        let tag = KeyTag::new(code, double_click);
        if is_down {
            log::trace!("key {} down -> {}", code, binding);
            sink.add_command(binding, tag);
        } else {
            let Some(held) = binding.strip_prefix('+') else {
                return false;
            };
            let release = format!("-{held}");
            log::trace!("key {} up -> {}", code, release);
            sink.add_command(&release, tag);
        }
        true
    }
}
