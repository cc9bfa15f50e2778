//! Draw submission core for gzcore.
//!
//! This crate provides the fixed-function rendering front end, including:
//!
//! - Viewport, letterbox and screen-to-window coordinate mapping
//! - A render-state machine that only sends changed state
//! - Textured quads, lines, points, fills, clears and polygons
//! - Render styles (translucent, additive, stencil, fuzz, ...)
//! - Offscreen framebuffer switching and scene-processing hooks
//!
//! Drawing goes through the [`RenderBackend`] trait. [`CommandBuffer`]
//! records commands, which is what the tests run against.

pub mod backend;
pub mod color;
pub mod error;
pub mod material;
pub mod params;
pub mod renderer;
pub mod state;
pub mod style;
pub mod viewport;

// Re-export main public types
pub use backend::{
    BackendCaps, CommandBuffer, FramebufferId, Primitive, RenderBackend, RenderCommand, Vertex,
};
pub use color::{PalEntry, Palette};
pub use error::RenderError;
pub use material::{ColorMode, MaterialCache, MaterialInfo, MaterialSource, TexBuffer, TextureHandle, UvRect};
pub use params::{ClipRect, DrawParams};
pub use renderer::{Renderer, SceneProcessor};
pub use state::{AlphaCompare, AlphaFunc, BlendEquation, BlendFactor, RenderState, StateTracker, TextureMode};
pub use style::{BlendOp, RenderStyle, apply_render_style};
pub use viewport::{IRect, SurfaceMetrics, SurfaceSize, ViewWindow, ViewportCalculator};
