//! Rectangle fills, clears and simple polygons.

use super::Renderer;
use crate::backend::{Primitive, RenderBackend, RenderCommand, Vertex};
use crate::color::PalEntry;
use crate::error::RenderError;
use crate::material::{ColorMode, MaterialSource, TextureHandle};

impl<B: RenderBackend, M: MaterialSource> Renderer<B, M> {
    /// Tile a texture over a rectangle, unscaled.
    ///
    /// With `local_origin` the texture starts at the rectangle's corner;
    /// otherwise it is aligned to the screen origin.
    pub fn flat_fill(
        &mut self,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        handle: TextureHandle,
        local_origin: bool,
    ) -> Result<bool, RenderError> {
        let Some(material) = self.materials.resolve(handle) else {
            log::debug!("flat_fill: unresolved material {handle:?}");
            return Ok(false);
        };
        self.backend.submit(RenderCommand::BindTexture {
            handle,
            color_mode: ColorMode::Default,
            translation: 0,
        });

        let tw = material.width.max(1) as f32;
        let th = material.height.max(1) as f32;
        let (u1, v1, u2, v2) = if local_origin {
            (0.0, 0.0, (right - left) as f32 / tw, (bottom - top) as f32 / th)
        } else {
            (
                left as f32 / tw,
                top as f32 / th,
                right as f32 / tw,
                bottom as f32 / th,
            )
        };

        self.state.apply(&mut self.backend, false);
        let white = [1.0; 4];
        let (l, t, r, b) = (left as f32, top as f32, right as f32, bottom as f32);
        self.backend.submit(RenderCommand::Draw {
            primitive: Primitive::TriangleStrip,
            vertices: vec![
                Vertex::new(l, t, u1, v1, white),
                Vertex::new(l, b, u1, v2, white),
                Vertex::new(r, t, u2, v1, white),
                Vertex::new(r, b, u2, v2, white),
            ],
        });
        self.verify_restored("flat_fill")?;
        Ok(true)
    }

    /// Clear a rectangle to a solid color.
    ///
    /// `color` is used when it is nonzero or when `palcolor` is -1;
    /// otherwise palette entry `palcolor`.
    pub fn clear(
        &mut self,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        palcolor: i32,
        color: PalEntry,
    ) -> Result<(), RenderError> {
        let p = if palcolor == -1 || color.0 != 0 {
            color
        } else {
            self.palette.get(palcolor)
        };

        let scissor = self.viewports.screen_rect_to_window(left, top, right, bottom);
        self.enable_scissor(scissor);
        self.backend.submit(RenderCommand::Clear(p.to_rgba(0.0)));
        self.disable_scissor();
        self.verify_restored("clear")
    }

    /// Fill a convex polygon with a texture, as one triangle fan.
    ///
    /// Texture coordinates derive from each point's offset to `origin`,
    /// divided by the texture's scaled size times `scale`, rotated by
    /// `rotation` degrees. Fewer than three points draw nothing.
    pub fn fill_simple_poly(
        &mut self,
        handle: TextureHandle,
        points: &[[f32; 2]],
        origin: [f64; 2],
        scale: [f64; 2],
        rotation: f64,
        light: PalEntry,
    ) -> Result<bool, RenderError> {
        if points.len() < 3 {
            return Ok(false);
        }
        let Some(material) = self.materials.resolve(handle) else {
            log::debug!("fill_simple_poly: unresolved material {handle:?}");
            return Ok(false);
        };
        self.backend.submit(RenderCommand::BindTexture {
            handle,
            color_mode: ColorMode::Default,
            translation: 0,
        });

        let rotate = rotation != 0.0;
        let (sin, cos) = (rotation.to_radians() as f32).sin_cos();
        let uscale = (1.0 / (f64::from(material.scaled_width) * scale[0])) as f32;
        let mut vscale = (1.0 / (f64::from(material.scaled_height) * scale[1])) as f32;
        if material.has_canvas {
            vscale = -vscale;
        }
        let (ox, oy) = (origin[0] as f32, origin[1] as f32);
        let color = light.to_rgba(1.0);

        let vertices = points
            .iter()
            .map(|&[px, py]| {
                let mut u = px - 0.5 - ox;
                let mut v = py - 0.5 - oy;
                if rotate {
                    let t = u;
                    u = t * cos - v * sin;
                    v = v * cos + t * sin;
                }
                Vertex::new(px, py, u * uscale, v * vscale, color)
            })
            .collect();

        self.state.apply(&mut self.backend, false);
        self.backend.submit(RenderCommand::Draw {
            primitive: Primitive::TriangleFan,
            vertices,
        });
        self.verify_restored("fill_simple_poly")?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CommandBuffer;
    use crate::color::Palette;
    use crate::material::{MaterialCache, MaterialInfo};
    use crate::viewport::{IRect, SurfaceSize, ViewWindow};
    use gzcore_config::RenderConfig;

    const FLAT: TextureHandle = TextureHandle(5);

    fn renderer() -> Renderer<CommandBuffer, MaterialCache> {
        let mut materials = MaterialCache::new();
        materials.register(FLAT, MaterialInfo::new(64, 64));
        let mut r = Renderer::new(CommandBuffer::new(), materials, &RenderConfig::default());
        r.set_output_viewport(None, &SurfaceSize::windowed(320, 200), ViewWindow::full(320, 200));
        r
    }

    #[test]
    fn test_flat_fill_texture_coordinates() {
        let mut r = renderer();
        assert_eq!(r.flat_fill(64, 32, 128, 96, FLAT, false), Ok(true));
        assert_eq!(r.flat_fill(64, 32, 128, 96, FLAT, true), Ok(true));
        let draws: Vec<_> = r.backend().draws().map(|(_, v)| v.to_vec()).collect();
        assert_eq!(draws[0][0].tex_coord, [1.0, 0.5]);
        assert_eq!(draws[0][3].tex_coord, [2.0, 1.5]);
        assert_eq!(draws[1][0].tex_coord, [0.0, 0.0]);
        assert_eq!(draws[1][3].tex_coord, [1.0, 1.0]);
    }

    #[test]
    fn test_flat_fill_unresolved() {
        let mut r = renderer();
        assert_eq!(r.flat_fill(0, 0, 10, 10, TextureHandle(77), false), Ok(false));
        assert!(r.backend().commands().is_empty());
    }

    #[test]
    fn test_clear_color_selection() {
        let mut r = renderer();
        let mut palette = Palette::default();
        palette.set(3, PalEntry::rgb(0, 0, 255));
        r.set_palette(palette);

        r.clear(0, 0, 10, 10, 3, PalEntry::BLACK).unwrap();
        r.clear(0, 0, 10, 10, -1, PalEntry::BLACK).unwrap();
        r.clear(0, 0, 10, 10, 3, PalEntry::rgb(255, 0, 0)).unwrap();

        let clears: Vec<[f32; 4]> = r
            .backend()
            .commands()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Clear(color) => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(
            clears,
            vec![[0.0, 0.0, 1.0, 0.0], [0.0, 0.0, 0.0, 0.0], [1.0, 0.0, 0.0, 0.0]]
        );
        assert!(!r.is_scissor_enabled());
    }

    #[test]
    fn test_clear_scissor_in_window_coordinates() {
        let mut r = renderer();
        r.clear(10, 20, 110, 70, -1, PalEntry::BLACK).unwrap();
        assert_eq!(
            r.backend().commands()[1],
            RenderCommand::Scissor(IRect::new(10, 130, 100, 50))
        );
    }

    #[test]
    fn test_simple_poly() {
        let mut r = renderer();
        let triangle = [[0.5, 0.5], [64.5, 0.5], [0.5, 64.5]];
        assert_eq!(
            r.fill_simple_poly(FLAT, &triangle[..2], [0.0, 0.0], [1.0, 1.0], 0.0, PalEntry::rgb(255, 255, 255)),
            Ok(false)
        );
        assert_eq!(
            r.fill_simple_poly(FLAT, &triangle, [0.0, 0.0], [1.0, 1.0], 0.0, PalEntry::rgb(255, 255, 255)),
            Ok(true)
        );
        let (primitive, vertices) = r.backend().draws().next().unwrap();
        assert_eq!(primitive, Primitive::TriangleFan);
        assert_eq!(vertices[1].tex_coord, [1.0, 0.0]);
        assert_eq!(vertices[2].tex_coord, [0.0, 1.0]);
        assert_eq!(vertices[2].position, [0.5, 64.5, 0.0]);
    }

    #[test]
    fn test_simple_poly_rotation() {
        let mut r = renderer();
        let square = [[0.5, 0.5], [64.5, 0.5], [64.5, 64.5], [0.5, 64.5]];
        r.fill_simple_poly(FLAT, &square, [0.0, 0.0], [1.0, 1.0], 90.0, PalEntry::BLACK)
            .unwrap();
        let (_, vertices) = r.backend().draws().next().unwrap();
        let [u, v] = vertices[1].tex_coord;
        assert!(u.abs() < 1e-5);
        assert!((v - 1.0).abs() < 1e-5);
    }
}
