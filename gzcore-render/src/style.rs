//! Render styles and their translation to blend and texture state.

use crate::state::{BlendEquation, BlendFactor, StateTracker, TextureMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendOp {
    /// No blending; the source replaces the destination.
    None,
    #[default]
    Add,
    Subtract,
    ReverseSubtract,
    /// Spectre-style darkening of what is already on screen.
    Fuzz,
    /// Darken the destination by the source alpha only.
    Shadow,
}

/// How a sprite or patch blends with the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderStyle {
    pub blend_op: BlendOp,
    pub src_alpha: BlendFactor,
    pub dest_alpha: BlendFactor,
    /// Draw the texture's shape in a single fill color.
    pub color_is_fixed: bool,
    /// Use the red channel as alpha.
    pub red_is_alpha: bool,
    /// Invert the texture's colors.
    pub invert_source: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl RenderStyle {
    pub const NORMAL: RenderStyle = RenderStyle {
        blend_op: BlendOp::Add,
        src_alpha: BlendFactor::SrcAlpha,
        dest_alpha: BlendFactor::OneMinusSrcAlpha,
        color_is_fixed: false,
        red_is_alpha: false,
        invert_source: false,
    };

    pub const OPAQUE: RenderStyle = RenderStyle {
        blend_op: BlendOp::None,
        src_alpha: BlendFactor::One,
        dest_alpha: BlendFactor::Zero,
        ..Self::NORMAL
    };

    pub const ADD: RenderStyle = RenderStyle {
        dest_alpha: BlendFactor::One,
        ..Self::NORMAL
    };

    pub const SUBTRACT: RenderStyle = RenderStyle {
        blend_op: BlendOp::ReverseSubtract,
        dest_alpha: BlendFactor::One,
        ..Self::NORMAL
    };

    /// Texture shape filled with the draw's fill color.
    pub const STENCIL: RenderStyle = RenderStyle {
        color_is_fixed: true,
        ..Self::NORMAL
    };

    /// Alpha taken from the red channel, colored with the fill color.
    pub const SHADED: RenderStyle = RenderStyle {
        color_is_fixed: true,
        red_is_alpha: true,
        ..Self::NORMAL
    };

    pub const FUZZY: RenderStyle = RenderStyle {
        blend_op: BlendOp::Fuzz,
        ..Self::NORMAL
    };

    pub const SHADOW: RenderStyle = RenderStyle {
        blend_op: BlendOp::Shadow,
        ..Self::NORMAL
    };

    /// Blend state `(src, dst, equation)` and texture mode for this style.
    pub fn resolve(
        &self,
        draw_opaque: bool,
        allow_color_blending: bool,
    ) -> (BlendFactor, BlendFactor, BlendEquation, TextureMode) {
        let texture_mode = if self.red_is_alpha {
            TextureMode::RedToAlpha
        } else if self.color_is_fixed {
            TextureMode::Mask
        } else if self.invert_source {
            if draw_opaque {
                TextureMode::InverseOpaque
            } else {
                TextureMode::Inverse
            }
        } else if draw_opaque {
            TextureMode::Opaque
        } else {
            TextureMode::Modulate
        };

        let (src, dst, equation) = match self.blend_op {
            BlendOp::None => (BlendFactor::One, BlendFactor::Zero, BlendEquation::Add),
            BlendOp::Add => (self.src_alpha, self.dest_alpha, BlendEquation::Add),
            BlendOp::Subtract => (self.src_alpha, self.dest_alpha, BlendEquation::Subtract),
            BlendOp::ReverseSubtract => (
                self.src_alpha,
                self.dest_alpha,
                BlendEquation::ReverseSubtract,
            ),
            BlendOp::Fuzz => (
                BlendFactor::DstColor,
                BlendFactor::OneMinusSrcAlpha,
                BlendEquation::Add,
            ),
            BlendOp::Shadow => (
                BlendFactor::Zero,
                BlendFactor::OneMinusSrcAlpha,
                BlendEquation::Add,
            ),
        };

        let (src, dst) = if allow_color_blending {
            (src, dst)
        } else {
            (alpha_factor(src), alpha_factor(dst))
        };
        (src, dst, equation, texture_mode)
    }
}

/// Source-color factors fall back to their alpha counterparts.
fn alpha_factor(factor: BlendFactor) -> BlendFactor {
    match factor {
        BlendFactor::SrcColor => BlendFactor::SrcAlpha,
        BlendFactor::OneMinusSrcColor => BlendFactor::OneMinusSrcAlpha,
        other => other,
    }
}

/// Set blend equation, blend factors and texture mode for `style`.
pub fn apply_render_style(
    state: &mut StateTracker,
    style: &RenderStyle,
    draw_opaque: bool,
    allow_color_blending: bool,
) {
    let (src, dst, equation, mode) = style.resolve(draw_opaque, allow_color_blending);
    state.blend_equation(equation);
    state.blend_func(src, dst);
    state.set_texture_mode(mode);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_style() {
        let (src, dst, eq, mode) = RenderStyle::NORMAL.resolve(false, false);
        assert_eq!(src, BlendFactor::SrcAlpha);
        assert_eq!(dst, BlendFactor::OneMinusSrcAlpha);
        assert_eq!(eq, BlendEquation::Add);
        assert_eq!(mode, TextureMode::Modulate);
        assert_eq!(RenderStyle::NORMAL.resolve(true, false).3, TextureMode::Opaque);
    }

    #[test]
    fn test_texture_mode_priority() {
        assert_eq!(RenderStyle::SHADED.resolve(true, false).3, TextureMode::RedToAlpha);
        assert_eq!(RenderStyle::STENCIL.resolve(true, false).3, TextureMode::Mask);
        let inverted = RenderStyle {
            invert_source: true,
            ..RenderStyle::NORMAL
        };
        assert_eq!(inverted.resolve(true, false).3, TextureMode::InverseOpaque);
        assert_eq!(inverted.resolve(false, false).3, TextureMode::Inverse);
    }

    #[test]
    fn test_special_blend_ops() {
        let (src, dst, eq, _) = RenderStyle::FUZZY.resolve(false, false);
        assert_eq!((src, dst, eq), (BlendFactor::DstColor, BlendFactor::OneMinusSrcAlpha, BlendEquation::Add));
        let (src, dst, _, _) = RenderStyle::SHADOW.resolve(false, false);
        assert_eq!((src, dst), (BlendFactor::Zero, BlendFactor::OneMinusSrcAlpha));
        let (_, _, eq, _) = RenderStyle::SUBTRACT.resolve(false, false);
        assert_eq!(eq, BlendEquation::ReverseSubtract);
    }

    #[test]
    fn test_color_blending_fallback() {
        let style = RenderStyle {
            src_alpha: BlendFactor::SrcColor,
            dest_alpha: BlendFactor::OneMinusSrcColor,
            ..RenderStyle::NORMAL
        };
        let (src, dst, _, _) = style.resolve(false, false);
        assert_eq!((src, dst), (BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha));
        let (src, _, _, _) = style.resolve(false, true);
        assert_eq!(src, BlendFactor::SrcColor);
    }

    #[test]
    fn test_apply_render_style_sets_pending() {
        let mut state = StateTracker::new();
        apply_render_style(&mut state, &RenderStyle::ADD, false, false);
        assert_eq!(state.pending().blend_dst, BlendFactor::One);
        assert_eq!(state.pending().texture_mode, TextureMode::Modulate);
    }
}
