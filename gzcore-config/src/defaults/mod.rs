//! Default value functions for configuration.
//!
//! Each sub-module groups related `default_*` free functions used as
//! `#[serde(default = "crate::defaults::...")]` attributes on `Config` fields.

mod input;
mod render;

// ── Render / viewport ──────────────────────────────────────────────────────
pub use render::{fullscreen, scale_viewport, screen_blocks};

// ── Input dispatch ─────────────────────────────────────────────────────────
pub use input::double_click_ms;
