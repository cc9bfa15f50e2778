//! Key-code → command tables.
//!
//! Three independent tables exist (primary, double-click, automap). Each
//! slot is [`BindingSlot::Unbound`], [`BindingSlot::Bound`], or
//! [`BindingSlot::PendingSuppression`] while a custom-section archive pass
//! is in progress. Readers never observe the pending state: it reads as an
//! empty binding.

use crate::error::BindError;
use crate::key_names::{KeyCode, KeyNameTable, NO_KEY, NUM_KEYS};
use gzcore_config::{
    AUTOMAP_BINDINGS_SECTION, BINDINGS_SECTION, ConfigSection, DOUBLE_BINDINGS_SECTION,
};

/// Which of the three tables a [`BindingTable`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Primary,
    DoubleClick,
    Automap,
}

impl BindingKind {
    pub const ALL: [BindingKind; 3] = [
        BindingKind::Primary,
        BindingKind::DoubleClick,
        BindingKind::Automap,
    ];

    /// Config section the table is persisted in.
    pub fn section_name(self) -> &'static str {
        match self {
            BindingKind::Primary => BINDINGS_SECTION,
            BindingKind::DoubleClick => DOUBLE_BINDINGS_SECTION,
            BindingKind::Automap => AUTOMAP_BINDINGS_SECTION,
        }
    }

    /// Header printed above a full listing.
    pub fn list_header(self) -> &'static str {
        match self {
            BindingKind::Primary => "Current key bindings",
            BindingKind::DoubleClick => "Current key doublebindings",
            BindingKind::Automap => "Current automap key bindings",
        }
    }
}

/// State of one key slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BindingSlot {
    #[default]
    Unbound,
    Bound(String),
    /// Written to a custom key section during the current archive; the
    /// unfiltered pass must skip it and leave the slot unbound.
    PendingSuppression,
}

impl BindingSlot {
    fn command(&self) -> Option<&str> {
        match self {
            BindingSlot::Bound(cmd) => Some(cmd),
            _ => None,
        }
    }

    fn matches(&self, command: &str) -> bool {
        self.command()
            .is_some_and(|cmd| cmd.eq_ignore_ascii_case(command))
    }
}

/// Destination of an archive pass.
pub trait BindingSink {
    fn set_value(&mut self, key: &str, value: &str);
    fn clear_key(&mut self, key: &str);
}

impl BindingSink for ConfigSection {
    fn set_value(&mut self, key: &str, value: &str) {
        ConfigSection::set_value(self, key, value);
    }

    fn clear_key(&mut self, key: &str) {
        ConfigSection::clear_key(self, key);
    }
}

/// A single binding table.
#[derive(Debug, Clone)]
pub struct BindingTable {
    kind: BindingKind,
    names: &'static KeyNameTable,
    slots: Vec<BindingSlot>,
}

impl BindingTable {
    /// Create an empty table using the process-wide key names.
    pub fn new(kind: BindingKind) -> Self {
        Self::with_names(kind, KeyNameTable::global())
    }

    pub fn with_names(kind: BindingKind, names: &'static KeyNameTable) -> Self {
        Self {
            kind,
            names,
            slots: vec![BindingSlot::Unbound; NUM_KEYS],
        }
    }

    pub fn kind(&self) -> BindingKind {
        self.kind
    }

    pub fn names(&self) -> &'static KeyNameTable {
        self.names
    }

    /// Bind `command` to the key called `key_name`, overwriting any previous
    /// binding. Config-file aliases (`LeftBracket`, ...) are accepted.
    pub fn bind(&mut self, key_name: &str, command: &str) -> Result<KeyCode, BindError> {
        let code = self.names.config_code(key_name);
        if code == NO_KEY {
            return Err(BindError::UnknownKey(key_name.to_string()));
        }
        if !self.set_bind(code, command) {
            return Err(BindError::KeyOutOfRange(u32::from(code)));
        }
        Ok(code)
    }

    /// Clear the binding of the key called `key_name`.
    pub fn unbind(&mut self, key_name: &str) -> Result<KeyCode, BindError> {
        let code = self.resolve(key_name)?;
        self.slots[code as usize] = BindingSlot::Unbound;
        log::debug!("{:?}: unbound {}", self.kind, key_name);
        Ok(code)
    }

    pub fn unbind_all(&mut self) {
        self.slots.fill(BindingSlot::Unbound);
    }

    /// Clear every key bound to `command` (case-insensitive). Returns the
    /// number of keys cleared.
    pub fn unbind_command(&mut self, command: &str) -> usize {
        let mut cleared = 0;
        for slot in self.slots.iter_mut().filter(|s| s.matches(command)) {
            *slot = BindingSlot::Unbound;
            cleared += 1;
        }
        cleared
    }

    /// Bind only if both the key and the command are currently free.
    ///
    /// Returns `Ok(true)` when the binding was made, `Ok(false)` when it was
    /// skipped because the key or the command is already in use.
    pub fn default_bind(&mut self, key_name: &str, command: &str) -> Result<bool, BindError> {
        let code = self.resolve(key_name)?;
        if self.slots[code as usize] != BindingSlot::Unbound {
            return Ok(false);
        }
        if self.slots.iter().any(|s| s.matches(command)) {
            return Ok(false);
        }
        self.slots[code as usize] = BindingSlot::Bound(command.to_string());
        Ok(true)
    }

    /// Set a slot directly by code. An empty command unbinds.
    ///
    /// Returns `false` for code 0 and codes outside the key space.
    pub fn set_bind(&mut self, code: KeyCode, command: &str) -> bool {
        if code == NO_KEY {
            return false;
        }
        let Some(slot) = self.slots.get_mut(code as usize) else {
            return false;
        };
        *slot = if command.is_empty() {
            BindingSlot::Unbound
        } else {
            BindingSlot::Bound(command.to_string())
        };
        true
    }

    /// Command bound to `code`, or `""` if unbound or out of range.
    pub fn binding(&self, code: KeyCode) -> &str {
        self.slots
            .get(code as usize)
            .and_then(BindingSlot::command)
            .unwrap_or("")
    }

    /// Raw slot state, for inspecting an archive pass.
    pub fn slot(&self, code: KeyCode) -> Option<&BindingSlot> {
        self.slots.get(code as usize)
    }

    /// First two keys (ascending code order) bound to `command`, and how many
    /// of them were found (0, 1 or 2). Missing keys are [`NO_KEY`].
    pub fn command_keys(&self, command: &str) -> (KeyCode, KeyCode, usize) {
        let mut found = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.matches(command))
            .map(|(code, _)| code as KeyCode);
        match (found.next(), found.next()) {
            (Some(first), Some(second)) => (first, second, 2),
            (Some(first), None) => (first, NO_KEY, 1),
            _ => (NO_KEY, NO_KEY, 0),
        }
    }

    /// `"a or b"` description of the keys bound to `command`.
    pub fn describe_command(&self, command: &str) -> String {
        let (first, second, _) = self.command_keys(command);
        self.names.describe_keys(first, second)
    }

    /// All bound keys in ascending code order.
    pub fn bound_keys(&self) -> impl Iterator<Item = (KeyCode, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(code, s)| s.command().map(|cmd| (code as KeyCode, cmd)))
    }

    /// Full listing: `header:` followed by one `<name> "<command>"` line per
    /// bound key.
    pub fn print_bindings(&self, header: &str) -> Vec<String> {
        let mut lines = vec![format!("{header}:")];
        lines.extend(
            self.bound_keys()
                .map(|(code, cmd)| format!("{} \"{}\"", self.names.name(code), cmd)),
        );
        lines
    }

    /// Serialize into `sink`.
    ///
    /// With `filter`, only keys bound to that command are written, and each
    /// written slot becomes [`BindingSlot::PendingSuppression`]. Without a
    /// filter, every key is processed: unbound keys are removed from the
    /// sink, pending slots are reset to unbound without being written, and
    /// bound keys are written under their config-safe name.
    pub fn archive(&mut self, sink: &mut dyn BindingSink, filter: Option<&str>) {
        let names = self.names;
        for (code, slot) in self.slots.iter_mut().enumerate().skip(1) {
            let code = code as KeyCode;
            match slot {
                BindingSlot::Unbound => {
                    if filter.is_none() {
                        sink.clear_key(&names.config_name(code));
                    }
                }
                BindingSlot::PendingSuppression => {
                    if filter.is_none() {
                        *slot = BindingSlot::Unbound;
                    }
                }
                BindingSlot::Bound(cmd) => match filter {
                    None => sink.set_value(&names.config_name(code), cmd),
                    Some(filter) if cmd.eq_ignore_ascii_case(filter) => {
                        sink.set_value(&names.config_name(code), cmd);
                        *slot = BindingSlot::PendingSuppression;
                    }
                    Some(_) => {}
                },
            }
        }
    }

    /// Apply every entry of a persisted section. Unknown keys are logged
    /// and skipped. Returns the number of entries applied.
    pub fn load_section(&mut self, section: &ConfigSection) -> usize {
        let mut applied = 0;
        for (key, command) in section.iter() {
            match self.bind(key, command) {
                Ok(_) => applied += 1,
                Err(e) => log::warn!("[{}] {}", section.name, e),
            }
        }
        log::debug!(
            "{:?}: loaded {} binding(s) from section {}",
            self.kind,
            applied,
            section.name
        );
        applied
    }

    fn resolve(&self, key_name: &str) -> Result<KeyCode, BindError> {
        let code = self.names.code(key_name);
        if code == NO_KEY {
            return Err(BindError::UnknownKey(key_name.to_string()));
        }
        if code as usize >= NUM_KEYS {
            return Err(BindError::KeyOutOfRange(u32::from(code)));
        }
        Ok(code)
    }
}
