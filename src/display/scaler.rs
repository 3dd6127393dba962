// Scalers - Nearest-neighbour blits from an indexed frame to a 16-bit screen
//
// Both paths walk the requested output size, skip rows and columns that
// fall off the physical screen, and sample the source with 16.16 fixed-point
// steps: rows by direct multiplication, columns with an accumulator.
//
// The smoothing path additionally blends neighbouring source columns when the
// horizontal step skips over pixels, which hides most of the shimmer that
// plain nearest-neighbour produces on a horizontal downscale. It never blends
// vertically.

use super::format::ChannelMasks;
use super::framebuffer::SourceFrame;
use super::geometry::{ScaleGeometry, FIXED_SHIFT};
use super::surface::Surface;
use super::tables::DirectColorTable;

/// Nearest-neighbour blit
pub fn blit_nearest(
    source: &SourceFrame<'_>,
    geom: &ScaleGeometry,
    colors: &DirectColorTable,
    screen: &mut Surface<'_>,
) {
    for i in 0..geom.height {
        let Some(dst_y) = geom.screen_row(i) else {
            continue;
        };
        let src_row = source_window_row(source, geom, i);
        let dst_row = screen.row_mut(dst_y);

        let mut acc = 0u32;
        for j in 0..geom.width {
            if let Some(dst_x) = geom.screen_column(j) {
                dst_row[dst_x] = colors.get(src_row[(acc >> FIXED_SHIFT) as usize]);
            }
            acc += geom.x_ratio;
        }
    }
}

/// Nearest-neighbour blit with horizontal neighbour blending
///
/// Where the step to the previous or next sample exceeds one source column,
/// the sampled pixel is averaged with the skipped-over neighbour(s), the
/// centre pixel weighted twice.
pub fn blit_smooth(
    source: &SourceFrame<'_>,
    geom: &ScaleGeometry,
    colors: &DirectColorTable,
    masks: ChannelMasks,
    screen: &mut Surface<'_>,
) {
    let masks = masks.as_array();

    for i in 0..geom.height {
        let Some(dst_y) = geom.screen_row(i) else {
            continue;
        };
        let src_row = source_window_row(source, geom, i);
        let dst_row = screen.row_mut(dst_y);

        let mut acc = 0u32;
        let mut prev_step = 0u32;
        for j in 0..geom.width {
            let x = (acc >> FIXED_SHIFT) as usize;
            let next_step = ((acc + geom.x_ratio) >> FIXED_SHIFT) - x as u32;

            if let Some(dst_x) = geom.screen_column(j) {
                let center = colors.get(src_row[x]);
                dst_row[dst_x] = if prev_step > 1 || next_step > 1 {
                    let left = (prev_step > 1 && x > 0).then(|| colors.get(src_row[x - 1]));
                    let has_right = next_step > 1 && x + 1 < src_row.len();
                    let right = has_right.then(|| colors.get(src_row[x + 1]));
                    blend(center, left, right, &masks)
                } else {
                    center
                };
            }

            prev_step = next_step;
            acc += geom.x_ratio;
        }
    }
}

/// Source window slice of the frame row sampled by output row `i`
#[inline]
fn source_window_row<'a>(source: &SourceFrame<'a>, geom: &ScaleGeometry, i: usize) -> &'a [u8] {
    let row = source.row(geom.source_row(i));
    &row[geom.src_x..geom.src_x + geom.src_width]
}

/// Weighted per-channel average: centre twice, each present neighbour once
pub fn blend(center: u16, left: Option<u16>, right: Option<u16>, masks: &[u32; 3]) -> u16 {
    let divisor = 2 + left.is_some() as u32 + right.is_some() as u32;
    let (center, left, right) = (center as u32, left.map(u32::from), right.map(u32::from));

    let mut out = 0u32;
    for &mask in masks {
        let mut sum = (center & mask) << 1;
        if let Some(px) = left {
            sum += px & mask;
        }
        if let Some(px) = right {
            sum += px & mask;
        }
        let avg = match divisor {
            2 => sum >> 1,
            4 => sum >> 2,
            n => sum / n,
        };
        out |= avg & mask;
    }
    out as u16
}
