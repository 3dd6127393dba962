// Configuration management
//
// Resolves the display settings the video core needs from a TOML file:
// aspect mode, side clipping, smoothing, region, the physical screen and its
// pixel format.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::display::{AspectMode, ChannelMasks, FormatError, PixelFormat, Region, VisibleLines};

/// Default configuration file path
pub const CONFIG_FILE: &str = "video_config.toml";

/// Errors that can occur while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid pixel format: {0}")]
    Format(#[from] FormatError),

    #[error("Invalid screen: {0}")]
    Screen(String),
}

/// Complete display configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Scaling settings
    pub video: ScalingConfig,

    /// Physical screen
    pub screen: ScreenConfig,

    /// Destination pixel format
    pub pixel_format: ChannelMasks,
}

/// Scaling settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingConfig {
    /// Aspect mode as stored by the menu (0 stretched, 1 cropped, 2 cropped default)
    pub aspect_ratio: u8,

    /// Hide 8 columns on each side
    pub clip_sides: bool,

    /// Blend skipped columns on horizontal downscale
    pub smooth_downscale: bool,

    /// Video region
    pub region: Region,

    /// Override for the first visible scan line
    pub first_line: Option<usize>,

    /// Override for the last visible scan line
    pub last_line: Option<usize>,
}

/// Physical screen geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Width in pixels
    pub width: usize,

    /// Height in pixels
    pub height: usize,

    /// Row stride in bytes (0 = tightly packed)
    pub pitch: usize,
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectMode::default().as_raw(),
            clip_sides: false,
            smooth_downscale: false,
            region: Region::Ntsc,
            first_line: None,
            last_line: None,
        }
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 240,
            height: 240,
            pitch: 480,
        }
    }
}

impl ScreenConfig {
    /// Row stride in bytes, resolving 0 to a packed row
    pub fn pitch_bytes(&self) -> usize {
        if self.pitch == 0 {
            self.width * 2
        } else {
            self.pitch
        }
    }

    /// Pixels needed to back this screen
    pub fn buffer_len(&self) -> usize {
        self.height * (self.pitch_bytes() / 2)
    }
}

impl VideoConfig {
    /// Load configuration from file or create default
    ///
    /// If the file does not exist the default configuration is returned and
    /// written out when possible. A file that exists but cannot be read,
    /// parsed or validated is left untouched and the default is used.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                info!("No video config at {}, writing defaults", path.display());
                let config = Self::default();
                // Try to save the default config, but don't fail if we can't
                if let Err(e) = config.save(path) {
                    warn!("Could not write default video config: {}", e);
                }
                config
            }
            Err(e) => {
                warn!("Using default video config ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        info!("Loaded video config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check everything the video core takes as a precondition
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pixel_format()?;

        let screen = &self.screen;
        if screen.width == 0 || screen.height == 0 {
            return Err(ConfigError::Screen(format!(
                "{}x{} has no area",
                screen.width, screen.height
            )));
        }
        let pitch = screen.pitch_bytes();
        if pitch % 2 != 0 || pitch < screen.width * 2 {
            return Err(ConfigError::Screen(format!(
                "pitch {} does not fit {} pixels",
                pitch, screen.width
            )));
        }

        let lines = self.visible_lines_unchecked();
        if lines.0 > lines.1 || lines.1 >= crate::display::SCREEN_HEIGHT {
            return Err(ConfigError::Screen(format!(
                "visible lines {}..={} outside the frame",
                lines.0, lines.1
            )));
        }
        Ok(())
    }

    /// Pixel format built from the configured masks
    pub fn pixel_format(&self) -> Result<PixelFormat, FormatError> {
        PixelFormat::from_masks(self.pixel_format)
    }

    /// Visible scan lines: region defaults with any overrides applied
    ///
    /// # Panics
    /// Panics on a range `validate` would reject
    pub fn visible_lines(&self) -> VisibleLines {
        let (first, last) = self.visible_lines_unchecked();
        VisibleLines::new(first, last)
    }

    fn visible_lines_unchecked(&self) -> (usize, usize) {
        let region = self.video.region.visible_lines();
        (
            self.video.first_line.unwrap_or(region.first),
            self.video.last_line.unwrap_or(region.last),
        )
    }
}
