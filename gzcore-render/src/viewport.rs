//! Viewport and letterbox geometry.
//!
//! Every frame the renderer derives three rectangles from the framebuffer
//! size, the client-window size and the status-bar setting:
//!
//! - the **letterbox**: the part of the client window actually used, centered
//! - the **screen viewport**: the full renderable area including the HUD
//! - the **scene viewport**: where the 3D view is drawn
//!
//! Window coordinates have their origin at the bottom-left, screen
//! coordinates at the top-left.

use gzcore_config::RenderConfig;

/// Client area assumed when the real one is empty (minimized window).
pub const MIN_CLIENT_WIDTH: i32 = 160;
pub const MIN_CLIENT_HEIGHT: i32 = 120;

/// Integer pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl IRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Size information the viewport math needs from the output surface.
pub trait SurfaceMetrics {
    /// Framebuffer width in pixels.
    fn width(&self) -> i32;
    /// Framebuffer height in pixels.
    fn height(&self) -> i32;
    /// Width of the window's client area. May be 0 while minimized.
    fn client_width(&self) -> i32;
    /// Height of the window's client area. May be 0 while minimized.
    fn client_height(&self) -> i32;
    fn is_fullscreen(&self) -> bool;
}

/// Plain-value surface description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: i32,
    pub height: i32,
    pub client_width: i32,
    pub client_height: i32,
    pub fullscreen: bool,
}

impl SurfaceSize {
    /// Surface whose client area matches the framebuffer.
    pub fn windowed(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            client_width: width,
            client_height: height,
            fullscreen: false,
        }
    }
}

impl SurfaceMetrics for SurfaceSize {
    fn width(&self) -> i32 {
        self.width
    }
    fn height(&self) -> i32 {
        self.height
    }
    fn client_width(&self) -> i32 {
        self.client_width
    }
    fn client_height(&self) -> i32 {
        self.client_height
    }
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

/// Placement of the 3D view inside the screen, as the game layer sizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewWindow {
    /// Left edge of the view in screen pixels.
    pub x: i32,
    /// Top edge of the view in screen pixels.
    pub y: i32,
    /// Visible view width.
    pub width: i32,
    /// Visible view height (excludes the status bar).
    pub height: i32,
}

impl ViewWindow {
    /// View covering the whole framebuffer.
    pub fn full(width: i32, height: i32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

/// Computes and holds the per-frame viewport rectangles.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportCalculator {
    /// Status-bar size setting (10 = full screen).
    pub screen_blocks: i32,
    /// Scale viewports into the letterbox when windowed.
    pub scale_viewport: bool,
    scene: IRect,
    screen: IRect,
    letterbox: IRect,
    framebuffer_width: i32,
    framebuffer_height: i32,
}

impl Default for ViewportCalculator {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

impl ViewportCalculator {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            screen_blocks: config.screen_blocks,
            scale_viewport: config.scale_viewport,
            scene: IRect::default(),
            screen: IRect::default(),
            letterbox: IRect::default(),
            framebuffer_width: 0,
            framebuffer_height: 0,
        }
    }

    /// Recompute all three rectangles.
    ///
    /// An explicit `bounds` rectangle is used verbatim for all of them.
    pub fn set_output_viewport(
        &mut self,
        bounds: Option<IRect>,
        surface: &dyn SurfaceMetrics,
        view: ViewWindow,
    ) {
        self.framebuffer_width = surface.width().max(1);
        self.framebuffer_height = surface.height().max(1);

        if let Some(rect) = bounds {
            self.scene = rect;
            self.screen = rect;
            self.letterbox = rect;
            return;
        }

        let screen_width = self.framebuffer_width;
        let screen_height = self.framebuffer_height;

        // Scene height shrinks with the status bar, aligned down to 8 pixels.
        let height = if self.screen_blocks >= 10 {
            screen_height
        } else {
            let shrunk = i64::from(self.screen_blocks.max(0)) * i64::from(screen_height) / 10;
            // Below 10 blocks the result is smaller than `screen_height`.
            (shrunk as i32) & !7
        };

        let (mut client_width, mut client_height) = (surface.client_width(), surface.client_height());
        if client_width <= 0 || client_height <= 0 {
            client_width = MIN_CLIENT_WIDTH;
            client_height = MIN_CLIENT_HEIGHT;
        }

        let scale = (client_width as f32 / screen_width as f32)
            .min(client_height as f32 / screen_height as f32);
        let letterbox_width = (screen_width as f32 * scale).round() as i32;
        let letterbox_height = (screen_height as f32 * scale).round() as i32;
        self.letterbox = IRect::new(
            (client_width - letterbox_width) / 2,
            (client_height - letterbox_height) / 2,
            letterbox_width,
            letterbox_height,
        );

        self.screen = IRect::new(0, 0, screen_width, screen_height);

        self.scene = IRect::new(
            view.x,
            screen_height - (height + view.y - ((height - view.height) / 2)),
            view.width,
            height,
        );

        if self.scale_viewport && !surface.is_fullscreen() {
            let scaled = |v: i32| (v as f32 * scale).round() as i32;
            self.screen.width = self.letterbox.width;
            self.screen.height = self.letterbox.height;
            self.scene = IRect::new(
                scaled(self.scene.left),
                scaled(self.scene.top),
                scaled(self.scene.width),
                scaled(self.scene.height),
            );

            self.screen.left += self.letterbox.left;
            self.screen.top += self.letterbox.top;
            self.scene.left += self.letterbox.left;
            self.scene.top += self.letterbox.top;
        }

        log::trace!(
            "viewport: letterbox={:?} screen={:?} scene={:?}",
            self.letterbox,
            self.screen,
            self.scene
        );
    }

    pub fn scene(&self) -> IRect {
        self.scene
    }

    pub fn screen(&self) -> IRect {
        self.screen
    }

    pub fn letterbox(&self) -> IRect {
        self.letterbox
    }

    /// Framebuffer size seen by the last `set_output_viewport`.
    pub fn framebuffer_size(&self) -> (i32, i32) {
        (self.framebuffer_width, self.framebuffer_height)
    }

    /// Window X for a screen X.
    pub fn screen_to_window_x(&self, x: i32) -> i32 {
        let scaled = f64::from(x) * f64::from(self.screen.width)
            / f64::from(self.framebuffer_width.max(1));
        self.screen.left.saturating_add(scaled.round() as i32)
    }

    /// Window Y for a screen Y. The axis is flipped.
    pub fn screen_to_window_y(&self, y: i32) -> i32 {
        let scaled = f64::from(y) * f64::from(self.screen.height)
            / f64::from(self.framebuffer_height.max(1));
        self.screen
            .top
            .saturating_add(self.screen.height)
            .saturating_sub(scaled.round() as i32)
    }

    /// Window-space rectangle for the screen-space edges
    /// `left..right` × `top..bottom`.
    pub fn screen_rect_to_window(&self, left: i32, top: i32, right: i32, bottom: i32) -> IRect {
        let x = self.screen_to_window_x(left);
        let y = self.screen_to_window_y(bottom);
        IRect::new(
            x,
            y,
            self.screen_to_window_x(right) - x,
            self.screen_to_window_y(top) - y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator(blocks: i32, scale: bool) -> ViewportCalculator {
        ViewportCalculator::new(&RenderConfig {
            screen_blocks: blocks,
            scale_viewport: scale,
            fullscreen: false,
        })
    }

    #[test]
    fn test_bounds_short_circuit() {
        let mut calc = calculator(10, true);
        let rect = IRect::new(5, 6, 70, 80);
        calc.set_output_viewport(Some(rect), &SurfaceSize::windowed(640, 480), ViewWindow::default());
        assert_eq!(calc.scene(), rect);
        assert_eq!(calc.screen(), rect);
        assert_eq!(calc.letterbox(), rect);
    }

    #[test]
    fn test_native_size_is_identity() {
        let mut calc = calculator(10, true);
        calc.set_output_viewport(None, &SurfaceSize::windowed(640, 480), ViewWindow::full(640, 480));
        assert_eq!(calc.letterbox(), IRect::new(0, 0, 640, 480));
        assert_eq!(calc.screen(), IRect::new(0, 0, 640, 480));
        assert_eq!(calc.scene(), IRect::new(0, 0, 640, 480));
    }

    #[test]
    fn test_wide_client_is_pillarboxed() {
        let mut calc = calculator(10, true);
        let surface = SurfaceSize {
            width: 640,
            height: 480,
            client_width: 1920,
            client_height: 1080,
            fullscreen: false,
        };
        calc.set_output_viewport(None, &surface, ViewWindow::full(640, 480));
        assert_eq!(calc.letterbox(), IRect::new(240, 0, 1440, 1080));
        assert_eq!(calc.screen(), IRect::new(240, 0, 1440, 1080));
        assert_eq!(calc.scene(), IRect::new(240, 0, 1440, 1080));
    }

    #[test]
    fn test_fullscreen_skips_scaling() {
        let mut calc = calculator(10, true);
        let surface = SurfaceSize {
            width: 640,
            height: 480,
            client_width: 1280,
            client_height: 960,
            fullscreen: true,
        };
        calc.set_output_viewport(None, &surface, ViewWindow::full(640, 480));
        assert_eq!(calc.letterbox(), IRect::new(0, 0, 1280, 960));
        assert_eq!(calc.screen(), IRect::new(0, 0, 640, 480));
    }

    #[test]
    fn test_status_bar_shrinks_scene() {
        let mut calc = calculator(8, false);
        // 8 * 200 / 10 = 160, already a multiple of 8.
        let view = ViewWindow {
            x: 32,
            y: 0,
            width: 256,
            height: 160,
        };
        calc.set_output_viewport(None, &SurfaceSize::windowed(320, 200), view);
        assert_eq!(calc.scene(), IRect::new(32, 40, 256, 160));
    }

    #[test]
    fn test_window_mapping_flips_y() {
        let mut calc = calculator(10, false);
        calc.set_output_viewport(None, &SurfaceSize::windowed(640, 480), ViewWindow::full(640, 480));
        assert_eq!(calc.screen_to_window_x(0), 0);
        assert_eq!(calc.screen_to_window_x(640), 640);
        assert_eq!(calc.screen_to_window_y(0), 480);
        assert_eq!(calc.screen_to_window_y(480), 0);
        assert_eq!(
            calc.screen_rect_to_window(10, 20, 110, 70),
            IRect::new(10, 410, 100, 50)
        );
    }

    #[test]
    fn test_huge_framebuffer_does_not_overflow() {
        let mut calc = calculator(9, false);
        let view = ViewWindow {
            x: 0,
            y: 0,
            width: 300_000_000,
            height: 270_000_000,
        };
        calc.set_output_viewport(None, &SurfaceSize::windowed(300_000_000, 300_000_000), view);
        assert_eq!(calc.scene().height, 270_000_000);
        assert_eq!(calc.scene().top, 30_000_000);
        assert_eq!(calc.screen_to_window_x(300_000_000), 300_000_000);
        assert_eq!(calc.screen_to_window_y(0), 300_000_000);
        assert_eq!(calc.screen_to_window_y(300_000_000), 0);
    }
}
