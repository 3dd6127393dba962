// Video Palette Engine - Palette state and per-frame scaling in one owner
//
// The engine owns the palette, the pixel format and both lookup tables, plus
// the display settings the blit depends on (aspect mode, side clipping,
// smoothing). Menus and config loaders talk to it through setters; the frame
// loop calls `blit` once per frame.

use log::{debug, warn};

use super::format::PixelFormat;
use super::framebuffer::{SourceFrame, SCREEN_WIDTH};
use super::geometry::{AspectMode, ScaleGeometry};
use super::palette::{Palette, Rgb};
use super::scaler::{blit_nearest, blit_smooth};
use super::surface::Surface;
use super::tables::{DirectColorTable, PairTranslationTable};

/// Palette, lookup tables and scaling settings for one display
pub struct VideoPaletteEngine {
    palette: Palette,
    format: PixelFormat,
    direct: DirectColorTable,
    pairs: PairTranslationTable,

    /// Stored aspect setting; may hold an out-of-range value written by a
    /// settings store until the next blit corrects it
    aspect_raw: u8,
    /// Geometry used by the previous blit
    last_geometry: Option<ScaleGeometry>,
    clip_sides: bool,
    smooth_downscale: bool,
}

impl VideoPaletteEngine {
    /// Create an engine with a black palette
    pub fn new(format: PixelFormat) -> Self {
        Self::with_palette(format, Palette::new())
    }

    /// Create an engine with an initial palette
    pub fn with_palette(format: PixelFormat, palette: Palette) -> Self {
        let direct = DirectColorTable::new(&palette, &format);
        let pairs = PairTranslationTable::new(&palette, &format);
        Self {
            palette,
            format,
            direct,
            pairs,
            aspect_raw: AspectMode::default().as_raw(),
            last_geometry: None,
            clip_sides: false,
            smooth_downscale: false,
        }
    }

    pub fn format(&self) -> &PixelFormat {
        &self.format
    }

    /// Colour stored in a palette slot
    #[inline]
    pub fn color(&self, index: u8) -> Rgb {
        self.palette.get(index)
    }

    /// Store a colour; the direct table entry is updated immediately
    ///
    /// The pair table is left alone until `commit_palette`.
    pub fn set_color(&mut self, index: u8, color: Rgb) {
        self.palette.set(index, color);
        self.direct.update(index, &self.palette, &self.format);
    }

    /// Rebuild the pair translation table from the current palette
    pub fn commit_palette(&mut self) {
        self.pairs.rebuild(&self.palette, &self.format);
        debug!("Pair translation table rebuilt");
    }

    /// Write colours from slot 0 upward, then commit
    ///
    /// Colours past slot 255 are ignored.
    pub fn load_palette(&mut self, colors: &[Rgb]) {
        for (index, &color) in (0..=255u8).zip(colors) {
            self.set_color(index, color);
        }
        self.commit_palette();
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn direct_table(&self) -> &DirectColorTable {
        &self.direct
    }

    pub fn pair_table(&self) -> &PairTranslationTable {
        &self.pairs
    }

    /// Select an aspect mode
    pub fn set_aspect_mode(&mut self, mode: AspectMode) {
        self.aspect_raw = mode.as_raw();
    }

    /// Store an aspect setting as read from a settings store, unvalidated
    pub fn set_aspect_mode_raw(&mut self, raw: u8) {
        self.aspect_raw = raw;
    }

    /// Raw stored aspect setting
    pub fn aspect_mode_raw(&self) -> u8 {
        self.aspect_raw
    }

    /// Effective aspect mode (invalid settings read as the default)
    pub fn aspect_mode(&self) -> AspectMode {
        AspectMode::from_raw(self.aspect_raw).unwrap_or_default()
    }

    pub fn set_clip_sides(&mut self, clip_sides: bool) {
        self.clip_sides = clip_sides;
    }

    pub fn clip_sides(&self) -> bool {
        self.clip_sides
    }

    pub fn set_smooth_downscale(&mut self, enabled: bool) {
        self.smooth_downscale = enabled;
    }

    pub fn smooth_downscale(&self) -> bool {
        self.smooth_downscale
    }

    /// Geometry the next blit would use for this source and screen
    pub fn geometry(&self, source: &SourceFrame<'_>, screen: &Surface<'_>) -> ScaleGeometry {
        ScaleGeometry::for_mode(
            self.aspect_mode(),
            self.clip_sides,
            source.visible(),
            screen.width(),
            screen.height(),
        )
    }

    /// Scale one frame onto the screen
    ///
    /// An invalid stored aspect setting is rewritten to the default. If the
    /// geometry differs from the previous blit's (aspect mode, side clipping,
    /// visible lines or screen size changed), the screen is cleared first so
    /// borders from the old layout do not linger.
    pub fn blit(&mut self, source: &SourceFrame<'_>, screen: &mut Surface<'_>) {
        let mode = self.normalize_aspect_mode();
        let geom = self.geometry(source, screen);

        if self.last_geometry != Some(geom) {
            debug!("Layout changed ({:?}), clearing screen", mode);
            screen.clear();
            self.last_geometry = Some(geom);
        }
        if self.smooth_downscale && geom.downscales_horizontally() {
            blit_smooth(source, &geom, &self.direct, self.format.masks(), screen);
        } else {
            blit_nearest(source, &geom, &self.direct, screen);
        }
    }

    /// Translate the visible source rows at native resolution via the pair table
    ///
    /// # Panics
    /// Panics if `out` holds fewer than `256 * visible lines` pixels
    pub fn translate_visible(&self, source: &SourceFrame<'_>, out: &mut [u16]) {
        assert!(
            out.len() >= SCREEN_WIDTH * source.visible().count(),
            "Output too small for visible source rows"
        );
        for (src_row, dst_row) in source.visible_rows().zip(out.chunks_exact_mut(SCREEN_WIDTH)) {
            self.pairs.translate_row(src_row, dst_row);
        }
    }

    fn normalize_aspect_mode(&mut self) -> AspectMode {
        match AspectMode::from_raw(self.aspect_raw) {
            Some(mode) => mode,
            None => {
                let mode = AspectMode::default();
                warn!(
                    "Invalid aspect setting {}, falling back to {:?}",
                    self.aspect_raw, mode
                );
                self.aspect_raw = mode.as_raw();
                mode
            }
        }
    }
}

impl Default for VideoPaletteEngine {
    fn default() -> Self {
        Self::new(PixelFormat::RGB565)
    }
}
