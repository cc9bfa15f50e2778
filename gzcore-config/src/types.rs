//! Setting groups stored in [`crate::Config`].

use serde::{Deserialize, Serialize};

// ============================================================================
// Render settings
// ============================================================================

/// Viewport-related render settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Status-bar size setting. 10 or more renders the scene at full
    /// framebuffer size; smaller values shrink it in tenths.
    #[serde(default = "crate::defaults::screen_blocks")]
    pub screen_blocks: i32,

    /// Scale the screen and scene viewports to fit the letterbox when
    /// running windowed.
    #[serde(default = "crate::defaults::scale_viewport")]
    pub scale_viewport: bool,

    /// Exclusive fullscreen. Viewport scaling is skipped when set.
    #[serde(default = "crate::defaults::fullscreen")]
    pub fullscreen: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            screen_blocks: crate::defaults::screen_blocks(),
            scale_viewport: crate::defaults::scale_viewport(),
            fullscreen: crate::defaults::fullscreen(),
        }
    }
}

// ============================================================================
// Input settings
// ============================================================================

/// Input dispatch settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Window after a key-down during which a repeat press counts as a
    /// double click, in milliseconds.
    #[serde(default = "crate::defaults::double_click_ms")]
    pub double_click_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            double_click_ms: crate::defaults::double_click_ms(),
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Log level for the debug log file.
///
/// Controls the verbosity of log output written to the debug log file.
/// Environment variables `RUST_LOG` and `--log-level` CLI flag take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
