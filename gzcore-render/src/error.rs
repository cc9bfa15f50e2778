//! Typed error types for gzcore-render.
//!
//! Draw calls with an unresolved material are not errors: they skip emission
//! and report `Ok(false)`. The variants here cover the cases a caller has to
//! act on.

use crate::material::TextureHandle;
use crate::state::RenderState;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The material source has no entry for the handle.
    #[error("Material {0:?} could not be resolved")]
    UnresolvedMaterial(TextureHandle),

    /// The material resolved but has no CPU-side pixel data.
    #[error("No pixel data available for {0:?}")]
    MissingPixelData(TextureHandle),

    /// Offscreen rendering was requested on a backend without framebuffer
    /// objects.
    #[error("Backend does not support framebuffer objects")]
    FramebuffersUnsupported,

    /// A draw call left render state behind that it did not restore.
    #[error("{operation} leaked render state: expected {expected:?}, found {actual:?} (scissor test enabled: {scissor})")]
    StateLeak {
        operation: &'static str,
        expected: Box<RenderState>,
        actual: Box<RenderState>,
        scissor: bool,
    },
}
