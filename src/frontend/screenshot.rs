// Screenshot functionality
//
// Captures either the scaled LCD surface or the visible source frame at its
// native resolution and saves it as a PNG file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::display::{PixelFormat, SourceFrame, Surface, VideoPaletteEngine, SCREEN_WIDTH};

/// Errors that can occur during screenshot operations
#[derive(Debug, Error)]
pub enum ScreenshotError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),
}

/// Save the scaled screen as it would appear on the LCD
///
/// # Returns
///
/// The path of the written file
pub fn save_surface_png(
    surface: &Surface<'_>,
    format: &PixelFormat,
    directory: &Path,
) -> Result<PathBuf, ScreenshotError> {
    let rows = (0..surface.height()).map(|y| surface.row(y));
    let rgb = packed_to_rgb(rows, format);
    write_capture(directory, "screen", &rgb, surface.width(), surface.height())
}

/// Save the visible source frame at native resolution
///
/// Translation goes through the pair table, so it reflects the palette as of
/// the last commit.
pub fn save_source_png(
    source: &SourceFrame<'_>,
    engine: &VideoPaletteEngine,
    directory: &Path,
) -> Result<PathBuf, ScreenshotError> {
    let lines = source.visible().count();
    let mut packed = vec![0u16; SCREEN_WIDTH * lines];
    engine.translate_visible(source, &mut packed);

    let rgb = packed_to_rgb(packed.chunks_exact(SCREEN_WIDTH), engine.format());
    write_capture(directory, "source", &rgb, SCREEN_WIDTH, lines)
}

fn write_capture(
    directory: &Path,
    kind: &str,
    rgb: &[u8],
    width: usize,
    height: usize,
) -> Result<PathBuf, ScreenshotError> {
    fs::create_dir_all(directory)?;

    // Generate filename with timestamp
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S%.3f");
    let file_path = directory.join(format!("{}_{}.png", kind, timestamp));

    save_png(&file_path, rgb, width as u32, height as u32)?;
    log::info!("Saved {} capture to {}", kind, file_path.display());
    Ok(file_path)
}

/// Expand packed pixel rows to RGB888
fn packed_to_rgb<'a>(rows: impl Iterator<Item = &'a [u16]>, format: &PixelFormat) -> Vec<u8> {
    let mut rgb_data = Vec::new();
    for row in rows {
        for &px in row {
            rgb_data.extend_from_slice(&format.unpack(px));
        }
    }
    rgb_data
}

/// Save RGB data as a PNG file
fn save_png(path: &Path, data: &[u8], width: u32, height: u32) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(data)?;

    Ok(())
}
