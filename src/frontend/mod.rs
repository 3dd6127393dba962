// Frontend - Per-frame glue between the emulation core and the LCD
//
// A `Session` owns everything that lives for as long as a game runs on the
// device: the video engine, the disk swap sequencer, the indexed frame the
// core renders into and the screen memory the LCD scans out.

pub mod config;
pub mod screenshot;

pub use config::{ConfigError, ScalingConfig, ScreenConfig, VideoConfig, CONFIG_FILE};
pub use screenshot::{save_source_png, save_surface_png, ScreenshotError};

use log::info;
use std::path::{Path, PathBuf};

use crate::disk::{DiskDrive, DiskSwapSequencer};
use crate::display::{
    window_to_source, FrameBuffer, Palette, SourcePoint, Surface, VideoPaletteEngine, VisibleLines,
};

/// Running display session
pub struct Session {
    engine: VideoPaletteEngine,
    sequencer: DiskSwapSequencer,
    frame: FrameBuffer,
    visible: VisibleLines,
    screen: ScreenConfig,
    screen_memory: Vec<u16>,
    frame_count: u64,
}

impl Session {
    /// Build a session from a configuration
    ///
    /// The palette starts as the NES master palette.
    pub fn new(config: &VideoConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let format = config.pixel_format()?;
        let mut engine = VideoPaletteEngine::with_palette(format, Palette::nes_default());
        engine.set_aspect_mode_raw(config.video.aspect_ratio);
        engine.set_clip_sides(config.video.clip_sides);
        engine.set_smooth_downscale(config.video.smooth_downscale);

        let screen = config.screen;
        info!(
            "Video session: {}x{} screen, pitch {}, aspect setting {}",
            screen.width,
            screen.height,
            screen.pitch_bytes(),
            config.video.aspect_ratio
        );

        Ok(Self {
            engine,
            sequencer: DiskSwapSequencer::new(),
            frame: FrameBuffer::new(),
            visible: config.visible_lines(),
            screen_memory: vec![0u16; screen.buffer_len()],
            screen,
            frame_count: 0,
        })
    }

    pub fn engine(&self) -> &VideoPaletteEngine {
        &self.engine
    }

    /// Palette and display settings, for menus
    pub fn engine_mut(&mut self) -> &mut VideoPaletteEngine {
        &mut self.engine
    }

    pub fn sequencer(&self) -> &DiskSwapSequencer {
        &self.sequencer
    }

    /// Frame the emulation core renders into
    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn visible_lines(&self) -> VisibleLines {
        self.visible
    }

    /// Change the visible range, e.g. after switching between NTSC and PAL
    ///
    /// The next `present` clears the screen if the layout moved.
    pub fn set_visible_lines(&mut self, visible: VisibleLines) {
        self.visible = visible;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Ask for the disk in the drive to be flipped
    pub fn request_disk_swap(&mut self) {
        self.sequencer.request_swap();
    }

    /// Present the current frame
    ///
    /// Ticks the disk sequencer once, then scales the frame onto the screen.
    pub fn present<D: DiskDrive + ?Sized>(&mut self, drive: &mut D) {
        self.sequencer.tick(drive);

        let source = self.frame.source(self.visible);
        let mut surface = Surface::new(
            &mut self.screen_memory,
            self.screen.width,
            self.screen.height,
            self.screen.pitch_bytes(),
        );
        self.engine.blit(&source, &mut surface);
        self.frame_count += 1;
    }

    /// Screen memory as the LCD would scan it out
    pub fn screen_memory(&self) -> &[u16] {
        &self.screen_memory
    }

    /// Zero the screen memory
    pub fn clear_screen(&mut self) {
        self.surface().clear();
    }

    /// Map a pointer position on the screen to frame coordinates
    pub fn map_pointer(&self, x: u16, y: u16) -> SourcePoint {
        window_to_source(x, y, self.engine.clip_sides(), self.visible.first)
    }

    /// Write the current screen contents to a PNG in `directory`
    pub fn capture_screen(&mut self, directory: &Path) -> Result<PathBuf, ScreenshotError> {
        let format = *self.engine.format();
        let surface = self.surface();
        save_surface_png(&surface, &format, directory)
    }

    /// Write the visible source frame to a PNG in `directory`
    pub fn capture_source(&self, directory: &Path) -> Result<PathBuf, ScreenshotError> {
        save_source_png(&self.frame.source(self.visible), &self.engine, directory)
    }

    fn surface(&mut self) -> Surface<'_> {
        Surface::new(
            &mut self.screen_memory,
            self.screen.width,
            self.screen.height,
            self.screen.pitch_bytes(),
        )
    }
}
