//! Fixed-function render-state machine.
//!
//! Draw code edits the *pending* state freely; [`StateTracker::apply`] then
//! sends only the fields that differ from what the backend last received.
//! A forced apply resends everything.

use crate::backend::{RenderBackend, RenderCommand};

/// How the texture color combines with the vertex color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureMode {
    /// Texture × vertex color.
    #[default]
    Modulate,
    /// Texture alpha forced to 1.
    Opaque,
    /// Only the texture alpha is used; color comes from the vertex.
    Mask,
    /// Red channel drives alpha.
    RedToAlpha,
    /// Inverted texture color, modulated.
    Inverse,
    /// Inverted texture color with alpha forced to 1.
    InverseOpaque,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendEquation {
    #[default]
    Add,
    Subtract,
    ReverseSubtract,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlphaCompare {
    Greater,
    GreaterEqual,
}

/// Alpha test comparison and reference value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaFunc {
    pub compare: AlphaCompare,
    pub reference: f32,
}

impl AlphaFunc {
    pub const DEFAULT: AlphaFunc = AlphaFunc {
        compare: AlphaCompare::GreaterEqual,
        reference: 0.5,
    };

    pub fn greater(reference: f32) -> Self {
        Self {
            compare: AlphaCompare::Greater,
            reference,
        }
    }
}

impl Default for AlphaFunc {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Snapshot of every tracked state field.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub texture_enabled: bool,
    pub texture_mode: TextureMode,
    pub blend_src: BlendFactor,
    pub blend_dst: BlendFactor,
    pub blend_equation: BlendEquation,
    pub alpha_test: bool,
    pub alpha_func: AlphaFunc,
    pub fog: bool,
    pub mode_2d: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            texture_enabled: true,
            texture_mode: TextureMode::Modulate,
            blend_src: BlendFactor::SrcAlpha,
            blend_dst: BlendFactor::OneMinusSrcAlpha,
            blend_equation: BlendEquation::Add,
            alpha_test: true,
            alpha_func: AlphaFunc::DEFAULT,
            fog: false,
            mode_2d: false,
        }
    }
}

impl RenderState {
    /// State every 2D draw call must leave behind. Fog and 2D mode are not
    /// touched by draw calls and are taken from `current`.
    pub fn draw_baseline(current: &RenderState) -> RenderState {
        RenderState {
            fog: current.fog,
            mode_2d: current.mode_2d,
            ..RenderState::default()
        }
    }

    /// Commands that turn `from` into `self`; all fields when `from` is
    /// `None`.
    fn diff(&self, from: Option<&RenderState>) -> Vec<RenderCommand> {
        let mut out = Vec::new();
        if from.is_none_or(|old| old.texture_enabled != self.texture_enabled) {
            out.push(RenderCommand::EnableTexture(self.texture_enabled));
        }
        if from.is_none_or(|old| old.texture_mode != self.texture_mode) {
            out.push(RenderCommand::TextureMode(self.texture_mode));
        }
        if from.is_none_or(|old| {
            (old.blend_src, old.blend_dst) != (self.blend_src, self.blend_dst)
        }) {
            out.push(RenderCommand::BlendFunc(self.blend_src, self.blend_dst));
        }
        if from.is_none_or(|old| old.blend_equation != self.blend_equation) {
            out.push(RenderCommand::BlendEquation(self.blend_equation));
        }
        if from.is_none_or(|old| old.alpha_test != self.alpha_test) {
            out.push(RenderCommand::AlphaTest(self.alpha_test));
        }
        if from.is_none_or(|old| old.alpha_func != self.alpha_func) {
            out.push(RenderCommand::AlphaFunc(self.alpha_func));
        }
        if from.is_none_or(|old| old.fog != self.fog) {
            out.push(RenderCommand::Fog(self.fog));
        }
        if from.is_none_or(|old| old.mode_2d != self.mode_2d) {
            out.push(RenderCommand::Mode2D(self.mode_2d));
        }
        out
    }
}

/// Pending state plus the state last sent to the backend.
#[derive(Debug, Clone, Default)]
pub struct StateTracker {
    pending: RenderState,
    applied: Option<RenderState>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &RenderState {
        &self.pending
    }

    /// State the backend currently holds, if anything was applied yet.
    pub fn applied(&self) -> Option<&RenderState> {
        self.applied.as_ref()
    }

    pub fn enable_texture(&mut self, on: bool) {
        self.pending.texture_enabled = on;
    }

    pub fn set_texture_mode(&mut self, mode: TextureMode) {
        self.pending.texture_mode = mode;
    }

    pub fn blend_func(&mut self, src: BlendFactor, dst: BlendFactor) {
        self.pending.blend_src = src;
        self.pending.blend_dst = dst;
    }

    pub fn blend_equation(&mut self, equation: BlendEquation) {
        self.pending.blend_equation = equation;
    }

    pub fn enable_alpha_test(&mut self, on: bool) {
        self.pending.alpha_test = on;
    }

    pub fn alpha_func(&mut self, func: AlphaFunc) {
        self.pending.alpha_func = func;
    }

    pub fn enable_fog(&mut self, on: bool) {
        self.pending.fog = on;
    }

    pub fn set_2d_mode(&mut self, on: bool) {
        self.pending.mode_2d = on;
    }

    /// Send pending changes to `backend`. Returns the number of state
    /// commands emitted.
    pub fn apply(&mut self, backend: &mut dyn RenderBackend, force: bool) -> usize {
        let base = if force { None } else { self.applied.as_ref() };
        let commands = self.pending.diff(base);
        let count = commands.len();
        for command in commands {
            backend.submit(command);
        }
        self.applied = Some(self.pending.clone());
        count
    }

    /// Forget what the backend holds, so the next apply resends everything.
    pub fn invalidate(&mut self) {
        self.applied = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CommandBuffer;

    #[test]
    fn test_first_apply_sends_everything() {
        let mut tracker = StateTracker::new();
        let mut buffer = CommandBuffer::new();
        assert_eq!(tracker.apply(&mut buffer, false), 8);
    }

    #[test]
    fn test_apply_sends_only_changes() {
        let mut tracker = StateTracker::new();
        let mut buffer = CommandBuffer::new();
        tracker.apply(&mut buffer, false);
        buffer.clear();

        tracker.set_texture_mode(TextureMode::Mask);
        tracker.enable_texture(true);
        assert_eq!(tracker.apply(&mut buffer, false), 1);
        assert_eq!(
            buffer.commands(),
            &[RenderCommand::TextureMode(TextureMode::Mask)]
        );
        assert_eq!(tracker.apply(&mut buffer, false), 0);
    }

    #[test]
    fn test_forced_apply_resends() {
        let mut tracker = StateTracker::new();
        let mut buffer = CommandBuffer::new();
        tracker.apply(&mut buffer, false);
        assert_eq!(tracker.apply(&mut buffer, true), 8);
    }

    #[test]
    fn test_draw_baseline_keeps_fog_and_mode() {
        let current = RenderState {
            fog: true,
            mode_2d: true,
            texture_mode: TextureMode::Opaque,
            ..RenderState::default()
        };
        let baseline = RenderState::draw_baseline(&current);
        assert!(baseline.fog && baseline.mode_2d);
        assert_eq!(baseline.texture_mode, TextureMode::Modulate);
    }
}
