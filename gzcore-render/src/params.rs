//! Parameters for a single textured-quad draw.

use crate::color::PalEntry;
use crate::style::RenderStyle;

/// Clip edges in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ClipRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Everything `Renderer::draw_texture` needs to place and shade a patch.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawParams {
    /// Destination X of the texture's origin, in screen pixels.
    pub x: f64,
    /// Destination Y of the texture's origin, in screen pixels.
    pub y: f64,
    pub dest_width: f64,
    pub dest_height: f64,
    /// Source texture width in texels.
    pub tex_width: f64,
    /// Source texture height in texels.
    pub tex_height: f64,
    /// Texture offset from its origin, in texels.
    pub left: f64,
    pub top: f64,
    /// Horizontal source window. Only texels in
    /// `window_left..window_right` are drawn.
    pub window_left: f64,
    pub window_right: f64,
    /// Scissor clip. `None` clips to the whole screen.
    pub clip: Option<ClipRect>,
    pub alpha: f32,
    /// Color used by styles with a fixed color.
    pub fill_color: PalEntry,
    /// Color blended over the texture in a second pass. A black overlay
    /// darkens the base pass instead.
    pub color_overlay: PalEntry,
    pub style: RenderStyle,
    /// Draw with transparency. Unmasked draws are opaque.
    pub masked: bool,
    /// The texture is an alpha-only (shaded) texture.
    pub alpha_channel: bool,
    pub flip_x: bool,
    /// Active translation table index, or 0 for none.
    pub translation: i32,
}

impl DrawParams {
    /// Draw a `width`×`height` texture unscaled at (`x`, `y`).
    pub fn at(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            dest_width: width,
            dest_height: height,
            tex_width: width,
            tex_height: height,
            left: 0.0,
            top: 0.0,
            window_left: 0.0,
            window_right: width,
            clip: None,
            alpha: 1.0,
            fill_color: PalEntry::BLACK,
            color_overlay: PalEntry::BLACK,
            style: RenderStyle::NORMAL,
            masked: true,
            alpha_channel: false,
            flip_x: false,
            translation: 0,
        }
    }

    /// Scale the destination to `width`×`height`.
    pub fn with_dest_size(mut self, width: f64, height: f64) -> Self {
        self.dest_width = width;
        self.dest_height = height;
        self
    }

    pub fn with_clip(mut self, clip: ClipRect) -> Self {
        self.clip = Some(clip);
        self
    }

    pub fn with_window(mut self, left: f64, right: f64) -> Self {
        self.window_left = left;
        self.window_right = right;
        self
    }

    pub fn with_overlay(mut self, overlay: PalEntry) -> Self {
        self.color_overlay = overlay;
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }
}
