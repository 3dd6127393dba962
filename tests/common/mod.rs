// Common test utilities for scaling integration tests
//
// Palettes here are built so that every slot packs to a distinct RGB565
// value, which lets a test tell exactly which source pixel landed where.

#![allow(dead_code)]

use nes_lcd::display::{FrameBuffer, Palette, PixelFormat, Rgb, VideoPaletteEngine};

/// Palette slot `i` packs (RGB565) to `((i >> 3) << 11) | ((i & 7) << 5)`
pub fn unique_palette() -> Palette {
    let mut palette = Palette::new();
    for i in 0..=255u8 {
        palette.set(i, Rgb::new(i & 0xF8, (i & 0x07) << 2, 0));
    }
    palette
}

/// Palette with white at even slots and black at odd slots
pub fn black_white_palette() -> Palette {
    let mut palette = Palette::new();
    for i in 0..=255u8 {
        let v = if i % 2 == 0 { 0xFF } else { 0x00 };
        palette.set(i, Rgb::new(v, v, v));
    }
    palette
}

/// RGB565 engine with a given palette
pub fn engine_with(palette: Palette) -> VideoPaletteEngine {
    VideoPaletteEngine::with_palette(PixelFormat::RGB565, palette)
}

/// Frame whose pixel at (x, y) is `f(x, y)`
pub fn frame_from_fn(f: impl Fn(usize, usize) -> u8) -> FrameBuffer {
    let mut frame = FrameBuffer::new();
    for y in 0..nes_lcd::display::SCREEN_HEIGHT {
        for x in 0..nes_lcd::display::SCREEN_WIDTH {
            frame.set_pixel(x, y, f(x, y));
        }
    }
    frame
}

/// Split an RGB565 pixel into its 5/6/5-bit channels
pub fn rgb565_channels(px: u16) -> [u32; 3] {
    [
        ((px >> 11) & 0x1F) as u32,
        ((px >> 5) & 0x3F) as u32,
        (px & 0x1F) as u32,
    ]
}

/// Reassemble 5/6/5-bit channels into an RGB565 pixel
pub fn rgb565_from_channels(c: [u32; 3]) -> u16 {
    ((c[0] << 11) | (c[1] << 5) | c[2]) as u16
}
