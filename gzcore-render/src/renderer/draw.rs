//! Textured quads, lines, points and dimming.

use super::Renderer;
use crate::backend::{Primitive, RenderBackend, RenderCommand, Vertex};
use crate::color::PalEntry;
use crate::error::RenderError;
use crate::material::{ColorMode, MaterialSource, TextureHandle};
use crate::params::{ClipRect, DrawParams};
use crate::state::{AlphaFunc, BlendEquation, BlendFactor, TextureMode};
use crate::style::apply_render_style;

/// Axis-aligned quad as a four-vertex triangle strip.
fn quad(x: f64, y: f64, w: f64, h: f64, uv: [f32; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [u1, v1, u2, v2] = uv;
    let (x1, y1) = (x as f32, y as f32);
    let (x2, y2) = ((x + w) as f32, (y + h) as f32);
    vec![
        Vertex::new(x1, y1, u1, v1, color),
        Vertex::new(x1, y2, u1, v2, color),
        Vertex::new(x2, y1, u2, v1, color),
        Vertex::new(x2, y2, u2, v2, color),
    ]
}

impl<B: RenderBackend, M: MaterialSource> Renderer<B, M> {
    /// Draw a patch or canvas texture.
    ///
    /// Returns `Ok(false)` without emitting anything when the material
    /// cannot be resolved. A black `color_overlay` is consumed here and
    /// folded into the light level.
    pub fn draw_texture(
        &mut self,
        handle: TextureHandle,
        params: &mut DrawParams,
    ) -> Result<bool, RenderError> {
        let Some(material) = self.materials.resolve(handle) else {
            log::debug!("draw_texture: unresolved material {handle:?}");
            return Ok(false);
        };

        let xscale = params.dest_width / params.tex_width;
        let yscale = params.dest_height / params.tex_height;
        let mut x = params.x - params.left * xscale;
        let y = params.y - params.top * yscale;
        let mut w = params.dest_width;
        let h = params.dest_height;
        let mut light = 1.0f32;

        if params.color_overlay.0 != 0 && params.color_overlay.is_black() {
            light = 1.0 - f32::from(params.color_overlay.a()) / 255.0;
            params.color_overlay = PalEntry::BLACK;
        }

        let [mut u1, v1, mut u2, v2] = if !material.has_canvas {
            let (color_mode, translation) = if params.alpha_channel {
                (ColorMode::Shade, 0)
            } else {
                (ColorMode::Default, params.translation)
            };
            self.backend.submit(RenderCommand::BindTexture {
                handle,
                color_mode,
                translation,
            });
            let uv = material.uv;
            [uv.left, uv.top, uv.right, uv.bottom]
        } else {
            self.backend.submit(RenderCommand::BindTexture {
                handle,
                color_mode: ColorMode::Default,
                translation: 0,
            });
            self.state.set_texture_mode(TextureMode::Opaque);
            // Canvases are stored upside down.
            [0.0, 0.0, 1.0, -1.0]
        };

        if params.flip_x {
            std::mem::swap(&mut u1, &mut u2);
        }

        if params.window_left > 0.0 || params.window_right < params.tex_width {
            let wi = params.window_right.min(params.tex_width);
            x += params.window_left * xscale;
            w -= (params.tex_width - wi + params.window_left) * xscale;
            u1 = (f64::from(u1) + params.window_left / params.tex_width) as f32;
            u2 = (f64::from(u2) - (params.tex_width - wi) / params.tex_width) as f32;
        }

        let color = if params.style.color_is_fixed {
            params.fill_color.to_rgba(params.alpha)
        } else {
            [light, light, light, params.alpha]
        };

        // Scissoring works in window coordinates, not the screen viewport.
        let (fb_width, fb_height) = self.viewports.framebuffer_size();
        let clip = params
            .clip
            .unwrap_or_else(|| ClipRect::new(0, 0, fb_width, fb_height));
        let scissor = self
            .viewports
            .screen_rect_to_window(clip.left, clip.top, clip.right, clip.bottom);
        self.enable_scissor(scissor);

        apply_render_style(&mut self.state, &params.style, !params.masked, false);
        if material.has_canvas {
            self.state.set_texture_mode(TextureMode::Opaque);
        }

        self.state.enable_alpha_test(false);
        self.state.apply(&mut self.backend, false);
        let uv = [u1, v1, u2, v2];
        self.backend.submit(RenderCommand::Draw {
            primitive: Primitive::TriangleStrip,
            vertices: quad(x, y, w, h, uv, color),
        });

        if params.color_overlay.0 != 0 {
            self.state.set_texture_mode(TextureMode::Mask);
            self.state
                .blend_func(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
            self.state.blend_equation(BlendEquation::Add);
            self.state.apply(&mut self.backend, false);
            self.backend.submit(RenderCommand::Draw {
                primitive: Primitive::TriangleStrip,
                vertices: quad(x, y, w, h, uv, params.color_overlay.to_rgba_packed()),
            });
        }

        self.state.enable_alpha_test(true);
        let screen = self.viewports.screen();
        self.backend.submit(RenderCommand::Scissor(screen));
        self.disable_scissor();
        self.state.set_texture_mode(TextureMode::Modulate);
        self.state
            .blend_func(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
        self.state.blend_equation(BlendEquation::Add);

        self.verify_restored("draw_texture")?;
        Ok(true)
    }

    /// Flat-colored line. A zero `color` selects palette entry `palcolor`.
    pub fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        palcolor: i32,
        color: PalEntry,
    ) -> Result<(), RenderError> {
        let c = self.line_color(palcolor, color);
        self.draw_untextured(
            Primitive::Lines,
            vec![
                Vertex::flat(x1 as f32, y1 as f32, c),
                Vertex::flat(x2 as f32, y2 as f32, c),
            ],
        );
        self.verify_restored("draw_line")
    }

    /// Single flat-colored pixel. A zero `color` selects palette entry
    /// `palcolor`.
    pub fn draw_pixel(
        &mut self,
        x: i32,
        y: i32,
        palcolor: i32,
        color: PalEntry,
    ) -> Result<(), RenderError> {
        let c = self.line_color(palcolor, color);
        self.draw_untextured(
            Primitive::Points,
            vec![Vertex::flat(x as f32, y as f32, c)],
        );
        self.verify_restored("draw_pixel")
    }

    /// Darken (or tint) a rectangle with `color` at opacity `amount`.
    pub fn dim(
        &mut self,
        color: PalEntry,
        amount: f32,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    ) -> Result<(), RenderError> {
        self.state.enable_texture(false);
        self.state
            .blend_func(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
        self.state.alpha_func(AlphaFunc::greater(0.0));
        self.state.apply(&mut self.backend, true);

        let c = color.to_rgba(amount);
        let (x1, y1, x2, y2) = (x as f32, y as f32, (x + w) as f32, (y + h) as f32);
        self.backend.submit(RenderCommand::Draw {
            primitive: Primitive::TriangleFan,
            vertices: vec![
                Vertex::flat(x1, y1, c),
                Vertex::flat(x1, y2, c),
                Vertex::flat(x2, y2, c),
                Vertex::flat(x2, y1, c),
            ],
        });

        self.state.enable_texture(true);
        self.state.alpha_func(AlphaFunc::DEFAULT);
        self.verify_restored("dim")
    }

    fn line_color(&self, palcolor: i32, color: PalEntry) -> [f32; 4] {
        let p = if color.0 != 0 {
            color
        } else {
            self.palette.get(palcolor)
        };
        p.to_rgba(1.0)
    }

    fn draw_untextured(&mut self, primitive: Primitive, vertices: Vec<Vertex>) {
        self.state.enable_texture(false);
        self.state.apply(&mut self.backend, true);
        self.backend.submit(RenderCommand::Draw {
            primitive,
            vertices,
        });
        self.state.enable_texture(true);
    }
}
