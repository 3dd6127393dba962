// Display module - Turns indexed NES frames into LCD pixels
//
// This module provides:
// - Palette store (256 RGB slots, seeded from the NES master palette)
// - Pixel format description and channel shift derivation
// - Direct and pair lookup tables from palette indices to packed pixels
// - Source frame and destination surface views
// - Aspect policies, scale geometry and the nearest-neighbour/smoothing blits

pub mod engine;
pub mod format;
pub mod framebuffer;
pub mod geometry;
pub mod palette;
pub mod scaler;
pub mod surface;
pub mod tables;

pub use engine::VideoPaletteEngine;
pub use format::{ChannelMasks, ChannelShift, FormatError, PixelFormat};
pub use framebuffer::{
    FrameBuffer, Region, SourceFrame, VisibleLines, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH,
};
pub use geometry::{window_to_source, AspectMode, ScaleGeometry, SourcePoint, CLIP_OFFSET};
pub use palette::{Palette, Rgb, NES_PALETTE};
pub use surface::Surface;
pub use tables::{DirectColorTable, PairTranslationTable};
