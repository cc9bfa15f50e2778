//! Materials: resolving opaque texture handles to bindable textures.
//!
//! Texture decoding and upload belong to an external texture manager; the
//! renderer only needs the size, texture-coordinate window and, for
//! screenshots and wipes, a CPU copy of the pixels.

use std::collections::{HashMap, HashSet};

/// Opaque texture reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u32);

/// How a bound texture's colors are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    #[default]
    Default,
    /// Alpha-only texture; color comes from the vertex.
    Shade,
}

/// Texture-coordinate window of a material inside its GPU texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Default for UvRect {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: 1.0,
            bottom: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialInfo {
    /// Texel width.
    pub width: u32,
    /// Texel height.
    pub height: u32,
    /// Width in world units after texture scaling.
    pub scaled_width: f32,
    /// Height in world units after texture scaling.
    pub scaled_height: f32,
    pub uv: UvRect,
    /// Render-target texture (camera canvas). Canvases are stored upside
    /// down and drawn opaque.
    pub has_canvas: bool,
}

impl MaterialInfo {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scaled_width: width as f32,
            scaled_height: height as f32,
            uv: UvRect::default(),
            has_canvas: false,
        }
    }

    pub fn canvas(width: u32, height: u32) -> Self {
        Self {
            has_canvas: true,
            ..Self::new(width, height)
        }
    }
}

/// RGBA8 pixel copy of a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Texture manager seam.
pub trait MaterialSource {
    /// Validate `handle` and describe the material, or `None` when it cannot
    /// be used.
    fn resolve(&mut self, handle: TextureHandle) -> Option<MaterialInfo>;

    /// CPU-side RGBA pixels for `handle`.
    fn pixels(&mut self, handle: TextureHandle) -> Option<TexBuffer>;

    /// Drop every cached GPU-side material.
    fn flush_all(&mut self);
}

/// In-memory material source.
#[derive(Debug, Default)]
pub struct MaterialCache {
    materials: HashMap<TextureHandle, MaterialInfo>,
    pixels: HashMap<TextureHandle, TexBuffer>,
    validated: HashSet<TextureHandle>,
}

impl MaterialCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handle: TextureHandle, info: MaterialInfo) {
        self.materials.insert(handle, info);
    }

    /// Register a material together with its pixel data.
    pub fn register_with_pixels(&mut self, handle: TextureHandle, info: MaterialInfo, pixels: Vec<u8>) {
        let buffer = TexBuffer {
            width: info.width,
            height: info.height,
            pixels,
        };
        self.materials.insert(handle, info);
        self.pixels.insert(handle, buffer);
    }

    /// Handles resolved since the last flush.
    pub fn validated_count(&self) -> usize {
        self.validated.len()
    }

    pub fn is_validated(&self, handle: TextureHandle) -> bool {
        self.validated.contains(&handle)
    }
}

impl MaterialSource for MaterialCache {
    fn resolve(&mut self, handle: TextureHandle) -> Option<MaterialInfo> {
        let info = self.materials.get(&handle)?.clone();
        self.validated.insert(handle);
        Some(info)
    }

    fn pixels(&mut self, handle: TextureHandle) -> Option<TexBuffer> {
        self.pixels.get(&handle).cloned()
    }

    fn flush_all(&mut self) {
        log::debug!("flushing {} validated materials", self.validated.len());
        self.validated.clear();
    }
}
