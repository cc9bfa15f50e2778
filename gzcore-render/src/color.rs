//! Packed colors and the base palette.

/// 32-bit ARGB color, laid out as `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PalEntry(pub u32);

impl PalEntry {
    pub const BLACK: PalEntry = PalEntry(0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0, r, g, b)
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        PalEntry((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// True when the color channels are all zero, whatever the alpha.
    pub const fn is_black(self) -> bool {
        self.0 & 0x00ff_ffff == 0
    }

    /// Normalized `[r, g, b, alpha]` with an explicit alpha.
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [
            f32::from(self.r()) / 255.0,
            f32::from(self.g()) / 255.0,
            f32::from(self.b()) / 255.0,
            alpha,
        ]
    }

    /// Normalized `[r, g, b, a]` using the packed alpha.
    pub fn to_rgba_packed(self) -> [f32; 4] {
        self.to_rgba(f32::from(self.a()) / 255.0)
    }
}

impl From<u32> for PalEntry {
    fn from(value: u32) -> Self {
        PalEntry(value)
    }
}

pub const PALETTE_SIZE: usize = 256;

/// The 256 base colors palette-indexed draws refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [PalEntry; PALETTE_SIZE],
}

impl Default for Palette {
    /// Grayscale ramp.
    fn default() -> Self {
        let mut colors = [PalEntry::BLACK; PALETTE_SIZE];
        for (i, color) in colors.iter_mut().enumerate() {
            let v = i as u8;
            *color = PalEntry::rgb(v, v, v);
        }
        Self { colors }
    }
}

impl Palette {
    pub fn new(colors: [PalEntry; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    /// Color at `index`; out-of-range indices read as black.
    pub fn get(&self, index: i32) -> PalEntry {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.colors.get(i).copied())
            .unwrap_or(PalEntry::BLACK)
    }

    pub fn set(&mut self, index: u8, color: PalEntry) {
        self.colors[usize::from(index)] = color;
    }
}
