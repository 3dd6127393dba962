// Pixel Format - Channel masks and the shifts derived from them
//
// A destination pixel format is described only by three bitmasks (red,
// green, blue). Everything else needed to turn an 8-bit RGB triple into a
// packed pixel is derived from those masks, so retargeting another 16-bit
// layout (RGB565, BGR565, RGB555, ...) means changing the masks and nothing
// else.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported when validating a set of channel masks
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// A channel uses bits above the 16-bit destination pixel
    #[error("{channel} mask {mask:#x} does not fit in a 16-bit pixel")]
    TooWide { channel: &'static str, mask: u32 },

    /// A channel's bits are not a single contiguous run
    #[error("{channel} mask {mask:#x} is not contiguous")]
    NotContiguous { channel: &'static str, mask: u32 },

    /// A channel is wider than the 8-bit source component
    #[error("{channel} mask {mask:#x} is wider than 8 bits")]
    TooManyBits { channel: &'static str, mask: u32 },

    /// Two channels claim the same bits
    #[error("channel masks overlap ({overlap:#x})")]
    Overlapping { overlap: u32 },
}

/// Bit positions used by each colour channel of the destination format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMasks {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl ChannelMasks {
    /// The 5-6-5 layout used by most handheld LCD controllers
    pub const RGB565: ChannelMasks = ChannelMasks {
        red: 0xF800,
        green: 0x07E0,
        blue: 0x001F,
    };

    /// Masks in red, green, blue order
    #[inline]
    pub fn as_array(&self) -> [u32; 3] {
        [self.red, self.green, self.blue]
    }
}

impl Default for ChannelMasks {
    fn default() -> Self {
        Self::RGB565
    }
}

/// Shift pair that moves an 8-bit component into its channel
///
/// `right` drops the low bits the channel has no room for, `left` moves
/// what is left up to the channel's lowest bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelShift {
    pub left: u32,
    pub right: u32,
}

impl ChannelShift {
    /// Derive the shift pair for one channel mask
    ///
    /// A zero mask gives `right = 8`, so the channel contributes no bits.
    pub const fn from_mask(mask: u32) -> Self {
        let left = if mask == 0 { 0 } else { mask.trailing_zeros() };
        let width = mask.count_ones();
        let right = if width >= 8 { 0 } else { 8 - width };
        Self { left, right }
    }

    /// Place an 8-bit component into this channel
    #[inline]
    pub const fn apply(self, value: u8) -> u32 {
        ((value as u32) >> self.right) << self.left
    }
}

/// Destination pixel format: masks plus their derived shifts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    masks: ChannelMasks,
    shifts: [ChannelShift; 3],
}

impl PixelFormat {
    /// RGB565 (0xF800 / 0x07E0 / 0x001F)
    pub const RGB565: PixelFormat = PixelFormat::derive(ChannelMasks::RGB565);

    const fn derive(masks: ChannelMasks) -> Self {
        Self {
            masks,
            shifts: [
                ChannelShift::from_mask(masks.red),
                ChannelShift::from_mask(masks.green),
                ChannelShift::from_mask(masks.blue),
            ],
        }
    }

    /// Build a pixel format from channel masks
    ///
    /// Masks must be contiguous, at most 8 bits wide, non-overlapping and
    /// inside the low 16 bits. An empty mask is accepted and drops that
    /// channel.
    pub fn from_masks(masks: ChannelMasks) -> Result<Self, FormatError> {
        let named = [
            ("red", masks.red),
            ("green", masks.green),
            ("blue", masks.blue),
        ];

        for (channel, mask) in named {
            if mask > 0xFFFF {
                return Err(FormatError::TooWide { channel, mask });
            }
            if mask.count_ones() > 8 {
                return Err(FormatError::TooManyBits { channel, mask });
            }
            if mask != 0 {
                let run = mask >> mask.trailing_zeros();
                if run & (run + 1) != 0 {
                    return Err(FormatError::NotContiguous { channel, mask });
                }
            }
        }

        let overlap = (masks.red & masks.green)
            | (masks.red & masks.blue)
            | (masks.green & masks.blue);
        if overlap != 0 {
            return Err(FormatError::Overlapping { overlap });
        }

        Ok(Self::derive(masks))
    }

    /// The channel masks this format was built from
    #[inline]
    pub fn masks(&self) -> ChannelMasks {
        self.masks
    }

    /// Per-channel shift pairs in red, green, blue order
    #[inline]
    pub fn shifts(&self) -> [ChannelShift; 3] {
        self.shifts
    }

    /// Pack an RGB triple into a destination pixel
    #[inline]
    pub fn pack(&self, r: u8, g: u8, b: u8) -> u16 {
        let [sr, sg, sb] = self.shifts;
        (sr.apply(r) | sg.apply(g) | sb.apply(b)) as u16
    }

    /// Expand a destination pixel back into 8-bit components
    ///
    /// Discarded low bits come back as zero.
    pub fn unpack(&self, pixel: u16) -> [u8; 3] {
        let pixel = pixel as u32;
        let mut out = [0u8; 3];
        for ((slot, mask), shift) in out.iter_mut().zip(self.masks.as_array()).zip(self.shifts) {
            *slot = (((pixel & mask) >> shift.left) << shift.right) as u8;
        }
        out
    }
}

impl Default for PixelFormat {
    fn default() -> Self {
        Self::RGB565
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb565_reference(r: u8, g: u8, b: u8) -> u16 {
        (((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3)
    }

    #[test]
    fn test_rgb565_shifts() {
        let [r, g, b] = PixelFormat::RGB565.shifts();
        assert_eq!(r, ChannelShift { left: 11, right: 3 });
        assert_eq!(g, ChannelShift { left: 5, right: 2 });
        assert_eq!(b, ChannelShift { left: 0, right: 3 });
    }

    #[test]
    fn test_rgb565_pack_matches_reference() {
        let format = PixelFormat::RGB565;
        for &(r, g, b) in &[
            (0, 0, 0),
            (255, 255, 255),
            (0x12, 0x34, 0x56),
            (0xFF, 0x00, 0x80),
            (0x07, 0x03, 0x07),
        ] {
            assert_eq!(format.pack(r, g, b), rgb565_reference(r, g, b));
        }
    }

    #[test]
    fn test_shift_keeps_only_mask_bits() {
        // BGR555 layout
        let masks = ChannelMasks {
            red: 0x001F,
            green: 0x03E0,
            blue: 0x7C00,
        };
        let format = PixelFormat::from_masks(masks).unwrap();
        for (mask, shift) in masks.as_array().into_iter().zip(format.shifts()) {
            for value in 0..=255u8 {
                let placed = shift.apply(value);
                assert_eq!(placed & !mask, 0);
                let width = mask.count_ones();
                assert_eq!(placed >> shift.left, (value as u32) >> (8 - width));
            }
        }
    }

    #[test]
    fn test_zero_mask_contributes_nothing() {
        let shift = ChannelShift::from_mask(0);
        assert_eq!(shift.right, 8);
        assert_eq!(shift.apply(0xFF), 0);

        let format = PixelFormat::from_masks(ChannelMasks {
            red: 0xF800,
            green: 0x07E0,
            blue: 0,
        })
        .unwrap();
        assert_eq!(format.pack(0, 0, 0xFF), 0);
    }

    #[test]
    fn test_unpack() {
        let format = PixelFormat::RGB565;
        assert_eq!(format.unpack(0xFFFF), [0xF8, 0xFC, 0xF8]);
        assert_eq!(format.unpack(format.pack(0x80, 0x40, 0x20)), [0x80, 0x40, 0x20]);
    }

    #[test]
    fn test_rejects_bad_masks() {
        let err = PixelFormat::from_masks(ChannelMasks {
            red: 0xF800,
            green: 0x0FE0,
            blue: 0x001F,
        })
        .unwrap_err();
        assert_eq!(err, FormatError::Overlapping { overlap: 0x0800 });

        assert!(matches!(
            PixelFormat::from_masks(ChannelMasks {
                red: 0xF0F0,
                green: 0,
                blue: 0
            }),
            Err(FormatError::NotContiguous { .. })
        ));
        assert!(matches!(
            PixelFormat::from_masks(ChannelMasks {
                red: 0x1_0000,
                green: 0,
                blue: 0
            }),
            Err(FormatError::TooWide { .. })
        ));
        assert!(matches!(
            PixelFormat::from_masks(ChannelMasks {
                red: 0x01FF,
                green: 0,
                blue: 0
            }),
            Err(FormatError::TooManyBits { .. })
        ));
    }

    #[test]
    fn test_from_masks_rgb565_equals_constant() {
        assert_eq!(
            PixelFormat::from_masks(ChannelMasks::RGB565).unwrap(),
            PixelFormat::RGB565
        );
    }
}
