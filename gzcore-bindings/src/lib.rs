//! Key-binding engine for gzcore.
//!
//! Maps input events (keyboard, mouse, joystick, gamepad) to console command
//! strings:
//!
//! - [`KeyNameTable`] converts between key codes and names
//! - [`BindingTable`] / [`BindingSet`] hold the primary, double-click and
//!   automap bindings and persist them to config sections
//! - [`InputDispatcher`] resolves events with double-click detection
//! - [`parse_defbinds`] reads `DEFBINDS` default-binding lumps
//! - [`winit_keys`] feeds winit events into the dispatcher

pub mod defbinds;
pub mod dispatcher;
pub mod error;
pub mod key_names;
pub mod set;
pub mod table;
pub mod winit_keys;

pub use defbinds::{DefaultBinding, ParsedLump, parse_defbinds};
pub use dispatcher::{
    Clock, CommandSink, DOUBLE_CLICK_MS, EventType, InputDispatcher, InputEvent, KEY_DBLCLICKED,
    KeyState, KeyTag, MonotonicClock,
};
pub use error::{BindError, DefbindsError};
pub use key_names::{KeyCode, KeyNameTable, KeyPlatform, NO_KEY, NUM_KEYS};
pub use set::{BindingSet, CustomKeySection, DefaultsReport, DefbindsLump};
pub use table::{BindingKind, BindingSink, BindingSlot, BindingTable};
