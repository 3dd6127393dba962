// NES LCD Library
// Palette lookup and fixed-point scaling of NES frames onto small handheld screens

// Public modules
pub mod disk;
pub mod display;
pub mod frontend;

// Re-export main types for convenience
pub use disk::{DiskDrive, DiskSwapSequencer, SwapState};
pub use display::{
    window_to_source, AspectMode, ChannelMasks, FormatError, FrameBuffer, PixelFormat, Region, Rgb,
    ScaleGeometry, SourceFrame, SourcePoint, Surface, VideoPaletteEngine, VisibleLines,
};
pub use frontend::{ConfigError, ScreenshotError, Session, VideoConfig};
