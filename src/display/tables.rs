// Lookup Tables - Palette indices to packed destination pixels
//
// Two tables are derived from the palette and the pixel format:
// - DirectColorTable: 256 entries, one packed pixel per palette slot. Kept
//   current on every slot write; the scalers read it per pixel.
// - PairTranslationTable: 65536 entries translating two indices at once
//   (low index in bits 0-7 of the key, high index in bits 8-15) into two
//   packed pixels (low in bits 0-15, high in bits 16-31). Rebuilt wholesale
//   only when a palette load is committed.

use super::format::PixelFormat;
use super::palette::{Palette, PALETTE_SIZE};

/// Number of entries in the pair translation table
pub const PAIR_TABLE_SIZE: usize = 1 << 16;

/// Palette index to packed pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectColorTable {
    entries: [u16; PALETTE_SIZE],
}

impl DirectColorTable {
    /// Build the table for every slot of a palette
    pub fn new(palette: &Palette, format: &PixelFormat) -> Self {
        let mut table = Self {
            entries: [0; PALETTE_SIZE],
        };
        table.rebuild(palette, format);
        table
    }

    /// Recompute all 256 entries
    pub fn rebuild(&mut self, palette: &Palette, format: &PixelFormat) {
        for (entry, color) in self.entries.iter_mut().zip(palette.as_slice()) {
            *entry = format.pack(color.r, color.g, color.b);
        }
    }

    /// Recompute a single entry after a slot write
    #[inline]
    pub fn update(&mut self, index: u8, palette: &Palette, format: &PixelFormat) {
        let color = palette.get(index);
        self.entries[index as usize] = format.pack(color.r, color.g, color.b);
    }

    /// Packed pixel for a palette index
    #[inline(always)]
    pub fn get(&self, index: u8) -> u16 {
        self.entries[index as usize]
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.entries
    }
}

/// Two palette indices to two packed pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairTranslationTable {
    entries: Box<[u32]>,
}

impl PairTranslationTable {
    /// Build the table for a palette
    pub fn new(palette: &Palette, format: &PixelFormat) -> Self {
        let mut table = Self {
            entries: vec![0u32; PAIR_TABLE_SIZE].into_boxed_slice(),
        };
        table.rebuild(palette, format);
        table
    }

    /// Recompute all 65536 entries
    pub fn rebuild(&mut self, palette: &Palette, format: &PixelFormat) {
        let mut packed = [0u32; PALETTE_SIZE];
        for (slot, color) in packed.iter_mut().zip(palette.as_slice()) {
            *slot = format.pack(color.r, color.g, color.b) as u32;
        }

        for (key, entry) in self.entries.iter_mut().enumerate() {
            let low = packed[key & 0xFF];
            let high = packed[key >> 8];
            *entry = low | (high << 16);
        }
    }

    /// Translate a packed index pair
    #[inline(always)]
    pub fn translate(&self, key: u16) -> u32 {
        self.entries[key as usize]
    }

    /// Translate a row of indices two pixels at a time
    ///
    /// A trailing odd pixel is translated through the low half of its
    /// own pair entry.
    ///
    /// # Panics
    /// Panics if `dst` is shorter than `src`
    pub fn translate_row(&self, src: &[u8], dst: &mut [u16]) {
        assert!(
            dst.len() >= src.len(),
            "Destination row too small for pair translation"
        );

        let mut pairs = src.chunks_exact(2);
        let mut out = dst.chunks_exact_mut(2);
        for (pair, px) in (&mut pairs).zip(&mut out) {
            let value = self.translate(u16::from_le_bytes([pair[0], pair[1]]));
            px[0] = value as u16;
            px[1] = (value >> 16) as u16;
        }

        if let [last] = pairs.remainder() {
            dst[src.len() - 1] = self.translate(*last as u16) as u16;
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::palette::Rgb;

    fn sample_palette() -> Palette {
        let mut palette = Palette::new();
        for i in 0..=255u8 {
            palette.set(i, Rgb::new(i, 255 - i, i.rotate_left(3)));
        }
        palette
    }

    #[test]
    fn test_direct_table_matches_pack() {
        let palette = sample_palette();
        let format = PixelFormat::RGB565;
        let table = DirectColorTable::new(&palette, &format);
        for i in 0..=255u8 {
            let c = palette.get(i);
            assert_eq!(table.get(i), format.pack(c.r, c.g, c.b));
        }
    }

    #[test]
    fn test_direct_update_single_slot() {
        let mut palette = sample_palette();
        let format = PixelFormat::RGB565;
        let mut table = DirectColorTable::new(&palette, &format);

        palette.set(7, Rgb::new(255, 255, 255));
        table.update(7, &palette, &format);
        assert_eq!(table.get(7), 0xFFFF);
        assert_eq!(table.get(8), DirectColorTable::new(&palette, &format).get(8));
    }

    #[test]
    fn test_pair_table_halves() {
        let palette = sample_palette();
        let format = PixelFormat::RGB565;
        let direct = DirectColorTable::new(&palette, &format);
        let pairs = PairTranslationTable::new(&palette, &format);

        assert_eq!(pairs.as_slice().len(), PAIR_TABLE_SIZE);
        for &(low, high) in &[(0u8, 0u8), (1, 2), (0xFF, 0x00), (0x00, 0xFF), (0x80, 0x7F)] {
            let value = pairs.translate(u16::from_le_bytes([low, high]));
            assert_eq!(value as u16, direct.get(low));
            assert_eq!((value >> 16) as u16, direct.get(high));
        }
    }

    #[test]
    fn test_pair_rebuild_is_idempotent() {
        let palette = sample_palette();
        let format = PixelFormat::RGB565;
        let mut table = PairTranslationTable::new(&palette, &format);
        let first = table.as_slice().to_vec();
        table.rebuild(&palette, &format);
        assert_eq!(table.as_slice(), &first[..]);
    }

    #[test]
    fn test_translate_row_odd_length() {
        let palette = sample_palette();
        let format = PixelFormat::RGB565;
        let direct = DirectColorTable::new(&palette, &format);
        let pairs = PairTranslationTable::new(&palette, &format);

        let src = [3u8, 200, 17, 0, 255];
        let mut dst = [0u16; 5];
        pairs.translate_row(&src, &mut dst);
        for (i, &index) in src.iter().enumerate() {
            assert_eq!(dst[i], direct.get(index));
        }
    }
}
