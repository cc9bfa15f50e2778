//! Core `Config` struct and its `Default` impl.

use crate::error::ConfigError;
use crate::section::ConfigSection;
use crate::types::{InputConfig, LogLevel, RenderConfig};
use serde::{Deserialize, Serialize};

/// Highest accepted `render.screen_blocks` value.
pub const MAX_SCREEN_BLOCKS: i32 = 12;

/// Top-level persisted configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub input: InputConfig,

    /// Verbosity of the debug log file.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Named key/value sections (binding sections, custom key sections).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<ConfigSection>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a section by case-insensitive name.
    pub fn section(&self, name: &str) -> Option<&ConfigSection> {
        self.sections
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Find a section by name, creating an empty one if it does not exist.
    pub fn section_mut(&mut self, name: &str) -> &mut ConfigSection {
        let index = match self
            .sections
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
        {
            Some(index) => index,
            None => {
                self.sections.push(ConfigSection::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Remove a section entirely. Returns `true` if it existed.
    pub fn remove_section(&mut self, name: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| !s.name.eq_ignore_ascii_case(name));
        self.sections.len() != before
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_SCREEN_BLOCKS).contains(&self.render.screen_blocks) {
            return Err(ConfigError::Validation {
                field: "render.screen_blocks",
                expected: format!("between 0 and {MAX_SCREEN_BLOCKS}"),
                value: i64::from(self.render.screen_blocks),
            });
        }
        if self.input.double_click_ms == 0 {
            return Err(ConfigError::Validation {
                field: "input.double_click_ms",
                expected: "greater than 0".to_string(),
                value: 0,
            });
        }
        Ok(())
    }

    pub fn with_screen_blocks(mut self, blocks: i32) -> Self {
        self.render.screen_blocks = blocks;
        self
    }

    pub fn with_scale_viewport(mut self, scale: bool) -> Self {
        self.render.scale_viewport = scale;
        self
    }
}
