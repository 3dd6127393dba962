// Frame Buffer - Indexed pixel data produced by the emulation core
//
// The NES has a resolution of 256×240 pixels. Each pixel is an 8-bit palette
// slot number. Only a range of scan lines is actually visible: NTSC sets hide
// the top and bottom 8 lines, PAL shows all 240.
//
// `FrameBuffer` owns the pixels; `SourceFrame` is the read-only view the
// scalers sample from, carrying the visible scan-line range with it.

use serde::{Deserialize, Serialize};

/// NES screen width in pixels
pub const SCREEN_WIDTH: usize = 256;

/// NES screen height in pixels
pub const SCREEN_HEIGHT: usize = 240;

/// Total number of pixels in the frame buffer
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Video region, which decides the visible scan-line range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Ntsc,
    Pal,
}

impl Region {
    /// Default visible lines for this region
    pub fn visible_lines(self) -> VisibleLines {
        match self {
            Region::Ntsc => VisibleLines::new(8, 231),
            Region::Pal => VisibleLines::new(0, 239),
        }
    }
}

/// Inclusive range of visible scan lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleLines {
    pub first: usize,
    pub last: usize,
}

impl VisibleLines {
    /// # Panics
    /// Panics if the range is empty or extends past the frame
    pub fn new(first: usize, last: usize) -> Self {
        assert!(
            first <= last && last < SCREEN_HEIGHT,
            "Invalid visible line range {}..={}",
            first,
            last
        );
        Self { first, last }
    }

    /// Number of visible lines
    #[inline]
    pub fn count(&self) -> usize {
        self.last - self.first + 1
    }
}

/// Frame buffer for storing indexed pixel data
pub struct FrameBuffer {
    /// Pixel data stored as palette indices
    pixels: Box<[u8]>,
}

impl FrameBuffer {
    /// Create a new frame buffer with every pixel at palette index 0
    pub fn new() -> Self {
        Self {
            pixels: vec![0u8; SCREEN_SIZE].into_boxed_slice(),
        }
    }

    /// Set a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, palette_index: u8) {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);

        self.pixels[y * SCREEN_WIDTH + x] = palette_index;
    }

    /// Get a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u8 {
        assert!(x < SCREEN_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < SCREEN_HEIGHT, "Y coordinate {} out of bounds", y);

        self.pixels[y * SCREEN_WIDTH + x]
    }

    /// Fill the frame with one palette index
    pub fn clear(&mut self, palette_index: u8) {
        self.pixels.fill(palette_index);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access for the emulation core to render into
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// View this frame with a visible line range
    pub fn source(&self, visible: VisibleLines) -> SourceFrame<'_> {
        SourceFrame::new(&self.pixels, visible)
    }

    /// Fill with 16×16 blocks cycling through all 256 palette slots
    pub fn test_pattern(&mut self) {
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                let palette_index = ((x / 16) + (y / 16) * 16) as u8;
                self.set_pixel(x, y, palette_index);
            }
        }
    }

    /// Fill with vertical stripes one pixel wide, alternating two indices
    pub fn stripe_pattern(&mut self, even: u8, odd: u8) {
        for row in self.pixels.chunks_exact_mut(SCREEN_WIDTH) {
            for (x, px) in row.iter_mut().enumerate() {
                *px = if x % 2 == 0 { even } else { odd };
            }
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of an indexed frame and its visible scan lines
#[derive(Clone, Copy)]
pub struct SourceFrame<'a> {
    pixels: &'a [u8],
    visible: VisibleLines,
}

impl<'a> SourceFrame<'a> {
    /// # Panics
    /// Panics if `pixels` does not hold a full 256×240 frame
    pub fn new(pixels: &'a [u8], visible: VisibleLines) -> Self {
        assert!(
            pixels.len() >= SCREEN_SIZE,
            "Source frame must be at least 256×240 pixels"
        );
        Self { pixels, visible }
    }

    #[inline]
    pub fn visible(&self) -> VisibleLines {
        self.visible
    }

    /// Full-width row `y` of the frame (not relative to the visible range)
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * SCREEN_WIDTH;
        &self.pixels[start..start + SCREEN_WIDTH]
    }

    /// Visible rows, top to bottom
    pub fn visible_rows(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        (self.visible.first..=self.visible.last).map(move |y| self.row(y))
    }
}
