//! The 2D draw submitter and its frame-level state.
//!
//! `Renderer` owns the backend, the material source, the viewport
//! rectangles and the render-state tracker. Draw calls live in `draw` and
//! `fill`; scene hooks in `scene`.

mod draw;
mod fill;
mod scene;

pub use scene::SceneProcessor;

use crate::backend::{FramebufferId, RenderBackend, RenderCommand};
use crate::color::Palette;
use crate::error::RenderError;
use crate::material::{MaterialSource, TexBuffer, TextureHandle};
use crate::state::{RenderState, StateTracker};
use crate::viewport::{IRect, SurfaceMetrics, ViewWindow, ViewportCalculator};
use gzcore_config::RenderConfig;

pub struct Renderer<B: RenderBackend, M: MaterialSource> {
    backend: B,
    materials: M,
    viewports: ViewportCalculator,
    state: StateTracker,
    palette: Palette,
    /// Mirrors the backend's scissor-test switch.
    scissor_enabled: bool,
    /// Offscreen framebuffer, created on first use.
    offscreen: Option<FramebufferId>,
    bound_framebuffer: FramebufferId,
    previous_framebuffer: FramebufferId,
    /// Lines submitted through the scene hooks.
    rendered_lines: usize,
}

impl<B: RenderBackend, M: MaterialSource> Renderer<B, M> {
    pub fn new(backend: B, materials: M, config: &RenderConfig) -> Self {
        Self {
            backend,
            materials,
            viewports: ViewportCalculator::new(config),
            state: StateTracker::new(),
            palette: Palette::default(),
            scissor_enabled: false,
            offscreen: None,
            bound_framebuffer: FramebufferId::DEFAULT,
            previous_framebuffer: FramebufferId::DEFAULT,
            rendered_lines: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn materials(&self) -> &M {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut M {
        &mut self.materials
    }

    pub fn viewports(&self) -> &ViewportCalculator {
        &self.viewports
    }

    pub fn state(&self) -> &StateTracker {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut StateTracker {
        &mut self.state
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn rendered_lines(&self) -> usize {
        self.rendered_lines
    }

    pub fn reset_rendered_lines(&mut self) {
        self.rendered_lines = 0;
    }

    pub fn is_scissor_enabled(&self) -> bool {
        self.scissor_enabled
    }

    /// Apply changed render settings.
    pub fn update_config(&mut self, config: &RenderConfig) {
        self.viewports.screen_blocks = config.screen_blocks;
        self.viewports.scale_viewport = config.scale_viewport;
    }

    /// Recompute the viewport rectangles for this frame.
    pub fn set_output_viewport(
        &mut self,
        bounds: Option<IRect>,
        surface: &dyn SurfaceMetrics,
        view: ViewWindow,
    ) {
        self.viewports.set_output_viewport(bounds, surface, view);
    }

    /// Set up viewport, scissor and state for HUD drawing.
    pub fn begin_2d(&mut self) {
        let screen = self.viewports.screen();
        self.backend.submit(RenderCommand::Viewport(screen));
        self.backend.submit(RenderCommand::Scissor(screen));
        self.state.enable_fog(false);
        self.state.set_2d_mode(true);
    }

    /// Check that the last draw call left the state machine at the 2D
    /// baseline with scissoring off.
    pub fn verify_restored(&self, operation: &'static str) -> Result<(), RenderError> {
        let actual = self.state.pending();
        let expected = RenderState::draw_baseline(actual);
        if *actual == expected && !self.scissor_enabled {
            return Ok(());
        }
        log::error!("{operation} did not restore render state");
        Err(RenderError::StateLeak {
            operation,
            expected: Box::new(expected),
            actual: Box::new(actual.clone()),
            scissor: self.scissor_enabled,
        })
    }

    /// Drop all cached materials.
    pub fn flush_textures(&mut self) {
        self.materials.flush_all();
    }

    /// CPU copy of a texture's pixels.
    pub fn texture_buffer(&mut self, handle: TextureHandle) -> Result<TexBuffer, RenderError> {
        if self.materials.resolve(handle).is_none() {
            return Err(RenderError::UnresolvedMaterial(handle));
        }
        self.materials
            .pixels(handle)
            .ok_or(RenderError::MissingPixelData(handle))
    }

    /// Redirect drawing into the offscreen framebuffer.
    pub fn start_offscreen(&mut self) -> Result<FramebufferId, RenderError> {
        if !self.backend.capabilities().framebuffers {
            return Err(RenderError::FramebuffersUnsupported);
        }
        let id = match self.offscreen {
            Some(id) => id,
            None => {
                let id = self
                    .backend
                    .create_framebuffer()
                    .ok_or(RenderError::FramebuffersUnsupported)?;
                log::debug!("created offscreen framebuffer {}", id.0);
                self.offscreen = Some(id);
                id
            }
        };
        self.previous_framebuffer = self.bound_framebuffer;
        self.bind_framebuffer(id);
        Ok(id)
    }

    /// Return to the framebuffer bound before `start_offscreen`.
    pub fn end_offscreen(&mut self) {
        if self.backend.capabilities().framebuffers {
            self.bind_framebuffer(self.previous_framebuffer);
        }
    }

    pub fn bound_framebuffer(&self) -> FramebufferId {
        self.bound_framebuffer
    }

    fn bind_framebuffer(&mut self, id: FramebufferId) {
        self.backend.submit(RenderCommand::BindFramebuffer(id));
        self.bound_framebuffer = id;
    }

    fn enable_scissor(&mut self, rect: IRect) {
        self.backend.submit(RenderCommand::ScissorTest(true));
        self.backend.submit(RenderCommand::Scissor(rect));
        self.scissor_enabled = true;
    }

    fn disable_scissor(&mut self) {
        self.backend.submit(RenderCommand::ScissorTest(false));
        self.scissor_enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendCaps, CommandBuffer};
    use crate::material::{MaterialCache, MaterialInfo};
    use crate::viewport::SurfaceSize;

    fn renderer(caps: BackendCaps) -> Renderer<CommandBuffer, MaterialCache> {
        Renderer::new(
            CommandBuffer::with_capabilities(caps),
            MaterialCache::new(),
            &RenderConfig::default(),
        )
    }

    #[test]
    fn test_begin_2d_uses_screen_viewport() {
        let mut r = renderer(BackendCaps::default());
        r.set_output_viewport(None, &SurfaceSize::windowed(320, 200), ViewWindow::full(320, 200));
        r.begin_2d();
        let screen = IRect::new(0, 0, 320, 200);
        assert_eq!(
            r.backend().commands(),
            &[RenderCommand::Viewport(screen), RenderCommand::Scissor(screen)]
        );
        assert!(r.state().pending().mode_2d);
        assert!(!r.state().pending().fog);
        assert!(r.verify_restored("begin_2d").is_ok());
    }

    #[test]
    fn test_verify_detects_leak() {
        let mut r = renderer(BackendCaps::default());
        r.state_mut().enable_alpha_test(false);
        let err = r.verify_restored("test").unwrap_err();
        assert!(matches!(err, RenderError::StateLeak { operation: "test", .. }));
    }

    #[test]
    fn test_offscreen_requires_framebuffers() {
        let mut r = renderer(BackendCaps::default());
        assert_eq!(r.start_offscreen(), Err(RenderError::FramebuffersUnsupported));
        r.end_offscreen();
        assert!(r.backend().commands().is_empty());
    }

    #[test]
    fn test_offscreen_reuses_framebuffer() {
        let mut r = renderer(BackendCaps { framebuffers: true });
        let first = r.start_offscreen().unwrap();
        r.end_offscreen();
        let second = r.start_offscreen().unwrap();
        r.end_offscreen();
        assert_eq!(first, second);
        assert_eq!(r.bound_framebuffer(), FramebufferId::DEFAULT);
        assert_eq!(
            r.backend().commands(),
            &[
                RenderCommand::BindFramebuffer(first),
                RenderCommand::BindFramebuffer(FramebufferId::DEFAULT),
                RenderCommand::BindFramebuffer(first),
                RenderCommand::BindFramebuffer(FramebufferId::DEFAULT),
            ]
        );
    }

    #[test]
    fn test_texture_buffer() {
        let mut r = renderer(BackendCaps::default());
        r.materials_mut()
            .register_with_pixels(TextureHandle(1), MaterialInfo::new(1, 1), vec![1, 2, 3, 4]);
        r.materials_mut().register(TextureHandle(2), MaterialInfo::new(8, 8));
        assert_eq!(r.texture_buffer(TextureHandle(1)).unwrap().pixels, vec![1, 2, 3, 4]);
        assert_eq!(
            r.texture_buffer(TextureHandle(2)),
            Err(RenderError::MissingPixelData(TextureHandle(2)))
        );
        assert_eq!(
            r.texture_buffer(TextureHandle(3)),
            Err(RenderError::UnresolvedMaterial(TextureHandle(3)))
        );
    }

    #[test]
    fn test_update_config_feeds_next_viewport() {
        let mut r = renderer(BackendCaps::default());
        let surface = SurfaceSize {
            width: 320,
            height: 200,
            client_width: 640,
            client_height: 400,
            fullscreen: false,
        };
        r.set_output_viewport(None, &surface, ViewWindow::full(320, 200));
        assert_eq!(r.viewports().screen(), IRect::new(0, 0, 640, 400));

        r.update_config(&RenderConfig {
            screen_blocks: 5,
            scale_viewport: false,
            fullscreen: false,
        });
        r.set_output_viewport(None, &surface, ViewWindow::full(320, 200));
        assert_eq!(r.viewports().screen(), IRect::new(0, 0, 320, 200));
        // 5 * 200 / 10 = 100, aligned down to 96.
        assert_eq!(r.viewports().scene().height, 96);
    }

    #[test]
    fn test_flush_textures_clears_validated_materials() {
        let mut r = renderer(BackendCaps::default());
        r.materials_mut()
            .register_with_pixels(TextureHandle(1), MaterialInfo::new(1, 1), vec![0; 4]);
        r.texture_buffer(TextureHandle(1)).unwrap();
        assert!(r.materials().is_validated(TextureHandle(1)));

        r.flush_textures();
        assert_eq!(r.materials().validated_count(), 0);
        // Flushing drops validation only; the material resolves again.
        assert!(r.texture_buffer(TextureHandle(1)).is_ok());
    }
}
