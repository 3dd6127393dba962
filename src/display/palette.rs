// Palette Store - The 256 RGB triples every indexed pixel resolves through
//
// The emulation core pushes colours in one slot at a time (for example when
// the user changes the palette or the brightness). Slots start out black.
//
// The standard 64-entry NES master palette is kept here as well so a fresh
// palette can be seeded without an external palette file. Slots above 0x3F
// repeat the master palette, which is how the emphasis banks look with no
// emphasis bits set.

/// Number of palette slots addressable by an indexed pixel
pub const PALETTE_SIZE: usize = 256;

/// NES master palette in RGB format (64 colors)
///
/// Each color is represented as a 32-bit value: 0xRRGGBB
/// The palette uses a standard RGB conversion that approximates the NTSC NES output.
pub const NES_PALETTE: [u32; 64] = [
    // $00-$0F
    0x666666, 0x002A88, 0x1412A7, 0x3B00A4, 0x5C007E, 0x6E0040, 0x6C0600, 0x561D00,
    0x333500, 0x0B4800, 0x005200, 0x004F08, 0x00404D, 0x000000, 0x000000, 0x000000,
    // $10-$1F
    0xADADAD, 0x155FD9, 0x4240FF, 0x7527FE, 0xA01ACC, 0xB71E7B, 0xB53120, 0x994E00,
    0x6B6D00, 0x388700, 0x0C9300, 0x008F32, 0x007C8D, 0x000000, 0x000000, 0x000000,
    // $20-$2F
    0xFFFEFF, 0x64B0FF, 0x9290FF, 0xC676FF, 0xF36AFF, 0xFE6ECC, 0xFE8170, 0xEA9E22,
    0xBCBE00, 0x88D800, 0x5CE430, 0x45E082, 0x48CDDE, 0x4F4F4F, 0x000000, 0x000000,
    // $30-$3F
    0xFFFEFF, 0xC0DFFF, 0xD3D2FF, 0xE8C8FF, 0xFBC2FF, 0xFEC4EA, 0xFECCC5, 0xF7D8A5,
    0xE4E594, 0xCFEF96, 0xBDF4AB, 0xB3F3CC, 0xB5EBF2, 0xB8B8B8, 0x000000, 0x000000,
];

/// An 8-bit-per-channel colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Split a 0xRRGGBB value into its components
    #[inline]
    pub const fn from_u32(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }
}

/// Palette store holding one colour per indexed-pixel value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
}

impl Palette {
    /// Create a palette with every slot black
    pub fn new() -> Self {
        Self {
            colors: [Rgb::BLACK; PALETTE_SIZE],
        }
    }

    /// Create a palette seeded from the NES master palette
    pub fn nes_default() -> Self {
        let mut palette = Self::new();
        for (i, slot) in palette.colors.iter_mut().enumerate() {
            *slot = Rgb::from_u32(NES_PALETTE[i & 0x3F]);
        }
        palette
    }

    /// Colour stored in a slot
    #[inline]
    pub fn get(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    /// Store a colour in a slot
    #[inline]
    pub fn set(&mut self, index: u8, color: Rgb) {
        self.colors[index as usize] = color;
    }

    /// All slots in index order
    pub fn as_slice(&self) -> &[Rgb] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}
