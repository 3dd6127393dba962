// Scale Geometry - Where the source window lands on the physical screen
//
// All ratios are 16.16 fixed point so the per-pixel loops stay in integer
// arithmetic. Offsets are signed: a negative offset means the requested
// image is larger than the screen on that axis and the leading rows/columns
// fall off the edge.

use super::framebuffer::{VisibleLines, SCREEN_WIDTH};

/// Fractional bits in a fixed-point ratio
pub const FIXED_SHIFT: u32 = 16;

/// 1.0 in 16.16 fixed point
pub const FIXED_ONE: u32 = 1 << FIXED_SHIFT;

/// Columns hidden on each side when side clipping is enabled
pub const CLIP_OFFSET: usize = 8;

/// Aspect policy for fitting the frame onto the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum AspectMode {
    /// Fill the whole physical screen
    Stretched = 0,
    /// 1:1 visible window, sampled from the clip offset and first visible line
    Cropped = 1,
    /// 1:1 window anchored at the frame origin
    #[default]
    CroppedDefault = 2,
}

impl AspectMode {
    /// Decode a stored setting; `None` for anything out of range
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(AspectMode::Stretched),
            1 => Some(AspectMode::Cropped),
            2 => Some(AspectMode::CroppedDefault),
            _ => None,
        }
    }

    #[inline]
    pub fn as_raw(self) -> u8 {
        self as u8
    }
}

/// Columns removed from each side of the frame
#[inline]
pub fn clip_offset(clip_sides: bool) -> usize {
    if clip_sides {
        CLIP_OFFSET
    } else {
        0
    }
}

/// Placement of one blit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleGeometry {
    /// Left column of the source window
    pub src_x: usize,
    /// Top row of the source window
    pub src_y: usize,
    pub src_width: usize,
    pub src_height: usize,
    /// Requested output width (may exceed the screen)
    pub width: usize,
    /// Requested output height (may exceed the screen)
    pub height: usize,
    pub screen_width: usize,
    pub screen_height: usize,
    /// Source columns per output column, 16.16
    pub x_ratio: u32,
    /// Source rows per output row, 16.16
    pub y_ratio: u32,
    /// Screen column of output column 0
    pub x_offset: isize,
    /// Screen row of output row 0
    pub y_offset: isize,
}

impl ScaleGeometry {
    /// Geometry for an aspect mode on a screen of the given physical size
    pub fn for_mode(
        mode: AspectMode,
        clip_sides: bool,
        visible: VisibleLines,
        screen_width: usize,
        screen_height: usize,
    ) -> Self {
        let clip = clip_offset(clip_sides);
        let cropped_width = SCREEN_WIDTH - clip * 2;
        let lines = visible.count();

        match mode {
            AspectMode::Stretched => Self::new(
                (0, visible.first, SCREEN_WIDTH, lines),
                (screen_width, screen_height),
                (screen_width, screen_height),
            ),
            AspectMode::Cropped => Self::new(
                (clip, visible.first, cropped_width, lines),
                (cropped_width, lines),
                (screen_width, screen_height),
            ),
            AspectMode::CroppedDefault => Self::new(
                (0, 0, cropped_width, lines),
                (cropped_width, lines),
                (screen_width, screen_height),
            ),
        }
    }

    /// Geometry from an explicit source window and requested size
    ///
    /// # Arguments
    /// * `window` - Source `(x, y, width, height)`
    /// * `size` - Requested output `(width, height)`
    /// * `screen` - Physical screen `(width, height)`
    ///
    /// # Panics
    /// Panics if any size is zero
    pub fn new(
        window: (usize, usize, usize, usize),
        size: (usize, usize),
        screen: (usize, usize),
    ) -> Self {
        let (src_x, src_y, src_width, src_height) = window;
        let (width, height) = size;
        let (screen_width, screen_height) = screen;
        assert!(
            src_width > 0 && src_height > 0 && width > 0 && height > 0,
            "Scale geometry needs non-zero sizes"
        );

        Self {
            src_x,
            src_y,
            src_width,
            src_height,
            width,
            height,
            screen_width,
            screen_height,
            x_ratio: ((src_width << FIXED_SHIFT) / width) as u32,
            y_ratio: ((src_height << FIXED_SHIFT) / height) as u32,
            x_offset: (screen_width as isize - width as isize) / 2,
            y_offset: (screen_height as isize - height as isize) / 2,
        }
    }

    /// Screen row for output row `i`, or `None` if it falls off the screen
    #[inline]
    pub fn screen_row(&self, i: usize) -> Option<usize> {
        let y = i as isize + self.y_offset;
        (0..self.screen_height as isize).contains(&y).then_some(y as usize)
    }

    /// Screen column for output column `j`, or `None` if it falls off the screen
    #[inline]
    pub fn screen_column(&self, j: usize) -> Option<usize> {
        let x = j as isize + self.x_offset;
        (0..self.screen_width as isize).contains(&x).then_some(x as usize)
    }

    /// Frame row sampled by output row `i`
    #[inline]
    pub fn source_row(&self, i: usize) -> usize {
        self.src_y + ((i as u32 * self.y_ratio) >> FIXED_SHIFT) as usize
    }

    /// More than one source column per output column
    #[inline]
    pub fn downscales_horizontally(&self) -> bool {
        self.x_ratio > FIXED_ONE
    }
}

/// A position in frame coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePoint {
    pub x: u16,
    pub y: u16,
}

impl SourcePoint {
    /// `x` in the low half, `y` in the high half
    #[inline]
    pub fn packed(self) -> u32 {
        self.x as u32 | ((self.y as u32) << 16)
    }
}

/// Translate a window-manager coordinate into frame coordinates
///
/// Accounts for the clipped side columns and the hidden scan lines above
/// the visible range. Used for light-gun style pointer input. Coordinates
/// are 16-bit and wrap on overflow.
pub fn window_to_source(x: u16, y: u16, clip_sides: bool, first_line: usize) -> SourcePoint {
    SourcePoint {
        x: x.wrapping_add(clip_offset(clip_sides) as u16),
        y: y.wrapping_add(first_line as u16),
    }
}
