//! Configuration system for the gzcore input and render core.
//!
//! This crate provides configuration loading, saving, and default values.
//! It includes:
//!
//! - Render settings (status-bar size, viewport scaling)
//! - Input settings (double-click window)
//! - Named binding sections persisted alongside the settings
//! - YAML persistence with atomic writes

pub mod config;
pub mod defaults;
pub mod error;
pub mod section;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use section::{ConfigEntry, ConfigSection};
pub use types::{InputConfig, LogLevel, RenderConfig};

/// Section holding the primary key bindings.
pub const BINDINGS_SECTION: &str = "Bindings";
/// Section holding the double-click key bindings.
pub const DOUBLE_BINDINGS_SECTION: &str = "DoubleBindings";
/// Section holding the automap key bindings.
pub const AUTOMAP_BINDINGS_SECTION: &str = "AutomapBindings";
