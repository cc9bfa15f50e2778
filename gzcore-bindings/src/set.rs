//! The three binding tables as one unit, plus default-binding and
//! config persistence entry points.

use crate::defbinds::{DefaultBinding, parse_defbinds};
use crate::error::DefbindsError;
use crate::key_names::KeyNameTable;
use crate::table::{BindingKind, BindingTable};
use gzcore_config::Config;

/// A config section holding bindings for a specific set of commands
/// (e.g. a mod's custom keys), archived before the general sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomKeySection {
    pub name: String,
    pub commands: Vec<String>,
}

impl CustomKeySection {
    pub fn new(name: impl Into<String>, commands: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }
}

/// A named DEFBINDS resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefbindsLump {
    pub name: String,
    pub text: String,
}

impl DefbindsLump {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Outcome of applying DEFBINDS lumps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultsReport {
    pub applied: usize,
    /// Syntax errors, tagged with the lump name.
    pub errors: Vec<(String, DefbindsError)>,
}

/// Primary, double-click and automap tables.
#[derive(Debug, Clone)]
pub struct BindingSet {
    pub primary: BindingTable,
    pub double: BindingTable,
    pub automap: BindingTable,
}

impl Default for BindingSet {
    fn default() -> Self {
        Self::with_names(KeyNameTable::global())
    }
}

impl BindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names(names: &'static KeyNameTable) -> Self {
        Self {
            primary: BindingTable::with_names(BindingKind::Primary, names),
            double: BindingTable::with_names(BindingKind::DoubleClick, names),
            automap: BindingTable::with_names(BindingKind::Automap, names),
        }
    }

    pub fn names(&self) -> &'static KeyNameTable {
        self.primary.names()
    }

    pub fn table(&self, kind: BindingKind) -> &BindingTable {
        match kind {
            BindingKind::Primary => &self.primary,
            BindingKind::DoubleClick => &self.double,
            BindingKind::Automap => &self.automap,
        }
    }

    pub fn table_mut(&mut self, kind: BindingKind) -> &mut BindingTable {
        match kind {
            BindingKind::Primary => &mut self.primary,
            BindingKind::DoubleClick => &mut self.double,
            BindingKind::Automap => &mut self.automap,
        }
    }

    /// Clear all three tables.
    pub fn unbind_all(&mut self) {
        for kind in BindingKind::ALL {
            self.table_mut(kind).unbind_all();
        }
    }

    /// Apply every lump in order. Entries overwrite existing bindings.
    pub fn bind_defaults(&mut self, lumps: &[DefbindsLump]) -> DefaultsReport {
        let mut report = DefaultsReport::default();
        for lump in lumps {
            let parsed = parse_defbinds(&lump.text, self.names());
            for DefaultBinding {
                target,
                key,
                command,
            } in &parsed.entries
            {
                if self.table_mut(*target).set_bind(*key, command) {
                    report.applied += 1;
                }
            }
            if let Some(error) = parsed.error {
                report.errors.push((lump.name.clone(), error));
            }
            log::debug!(
                "Applied {} default binding(s) from {}",
                parsed.entries.len(),
                lump.name
            );
        }
        log::info!(
            "Default bindings: {} applied from {} lump(s)",
            report.applied,
            lumps.len()
        );
        report
    }

    /// Unbind everything, then apply the defaults.
    pub fn set_default_bindings(&mut self, lumps: &[DefbindsLump]) -> DefaultsReport {
        self.unbind_all();
        self.bind_defaults(lumps)
    }

    /// Load all three tables from their config sections. Tables whose
    /// section is missing are left untouched.
    pub fn load_from_config(&mut self, config: &Config) -> usize {
        let mut loaded = 0;
        for kind in BindingKind::ALL {
            if let Some(section) = config.section(kind.section_name()) {
                loaded += self.table_mut(kind).load_section(section);
            }
        }
        loaded
    }

    /// Write every table into `config`.
    ///
    /// Custom key sections are rebuilt first, each holding the primary keys
    /// bound to its commands; those keys are then left out of `Bindings`.
    /// After the call the keys written to custom sections are unbound in
    /// the primary table, so the caller reloads from config before reuse.
    pub fn archive(&mut self, config: &mut Config, custom_sections: &[CustomKeySection]) {
        for custom in custom_sections {
            config.remove_section(&custom.name);
            let section = config.section_mut(&custom.name);
            for command in &custom.commands {
                self.primary.archive(&mut *section, Some(command));
            }
        }

        for kind in BindingKind::ALL {
            let section = config.section_mut(kind.section_name());
            self.table_mut(kind).archive(section, None);
        }
        log::debug!(
            "Archived bindings ({} custom section(s))",
            custom_sections.len()
        );
    }
}
