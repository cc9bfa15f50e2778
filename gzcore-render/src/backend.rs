//! Backend seam: recorded render commands and the [`RenderBackend`] trait.
//!
//! The renderer never talks to a graphics API directly. It submits
//! [`RenderCommand`]s; a GPU backend translates them, and [`CommandBuffer`]
//! records them for inspection.

use crate::material::{ColorMode, TextureHandle};
use crate::state::{AlphaFunc, BlendEquation, BlendFactor, TextureMode};
use crate::viewport::IRect;

/// One vertex of a primitive. Layout matches what a GPU vertex buffer
/// expects, so recorded geometry can be uploaded with `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coord: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y, 0.0],
            tex_coord: [u, v],
            color,
        }
    }

    /// Untextured vertex.
    pub fn flat(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self::new(x, y, 0.0, 0.0, color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    TriangleStrip,
    TriangleFan,
    Lines,
    Points,
}

/// Framebuffer object id. 0 is the default (window) framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FramebufferId(pub u32);

impl FramebufferId {
    pub const DEFAULT: FramebufferId = FramebufferId(0);
}

/// Optional features a backend may provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BackendCaps {
    pub framebuffers: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Viewport(IRect),
    /// Scissor rectangle in window coordinates (origin bottom-left).
    Scissor(IRect),
    ScissorTest(bool),
    EnableTexture(bool),
    TextureMode(TextureMode),
    BlendFunc(BlendFactor, BlendFactor),
    BlendEquation(BlendEquation),
    AlphaTest(bool),
    AlphaFunc(AlphaFunc),
    Fog(bool),
    Mode2D(bool),
    BindTexture {
        handle: TextureHandle,
        color_mode: ColorMode,
        translation: i32,
    },
    Draw {
        primitive: Primitive,
        vertices: Vec<Vertex>,
    },
    /// Clear the color buffer (within the scissor, if enabled).
    Clear([f32; 4]),
    BindFramebuffer(FramebufferId),
}

/// Receiver of render commands.
pub trait RenderBackend {
    fn capabilities(&self) -> BackendCaps;

    fn submit(&mut self, command: RenderCommand);

    /// Allocate a framebuffer object. `None` when unsupported.
    fn create_framebuffer(&mut self) -> Option<FramebufferId>;
}

/// Backend that records every command in submission order.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    caps: BackendCaps,
    commands: Vec<RenderCommand>,
    next_framebuffer: u32,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capabilities(caps: BackendCaps) -> Self {
        Self {
            caps,
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Recorded draw calls, in order.
    pub fn draws(&self) -> impl Iterator<Item = (Primitive, &[Vertex])> {
        self.commands.iter().filter_map(|c| match c {
            RenderCommand::Draw {
                primitive,
                vertices,
            } => Some((*primitive, vertices.as_slice())),
            _ => None,
        })
    }

    /// All recorded geometry as raw bytes, ready for a vertex buffer upload.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        let vertices: Vec<Vertex> = self
            .draws()
            .flat_map(|(_, v)| v.iter().copied())
            .collect();
        bytemuck::cast_slice(&vertices).to_vec()
    }
}

impl RenderBackend for CommandBuffer {
    fn capabilities(&self) -> BackendCaps {
        self.caps
    }

    fn submit(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    fn create_framebuffer(&mut self) -> Option<FramebufferId> {
        if !self.caps.framebuffers {
            return None;
        }
        self.next_framebuffer += 1;
        Some(FramebufferId(self.next_framebuffer))
    }
}
