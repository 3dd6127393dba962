// NES LCD - Headless renderer
//
// Pushes a test-pattern frame through the video engine with the configured
// screen and aspect settings, then writes PNG captures of the result.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

use nes_lcd::disk::DiskDrive;
use nes_lcd::display::AspectMode;
use nes_lcd::frontend::{Session, VideoConfig, CONFIG_FILE};

#[derive(Parser)]
#[command(name = "nes-lcd")]
#[command(about = "Scale NES frames onto a small LCD and capture the result")]
struct Cli {
    /// Configuration file (created with defaults if missing)
    #[arg(short, long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Override the aspect mode
    #[arg(long, value_enum)]
    aspect: Option<AspectArg>,

    /// Hide 8 columns on each side
    #[arg(long)]
    clip_sides: bool,

    /// Blend skipped columns when downscaling
    #[arg(long)]
    smooth: bool,

    /// Number of frames to present
    #[arg(short = 'n', long, default_value = "1")]
    frames: u32,

    /// Request a disk side swap before this frame
    #[arg(long)]
    swap_at: Option<u32>,

    /// Directory for PNG captures
    #[arg(short, long, default_value = "screenshots")]
    output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum AspectArg {
    Stretched,
    Cropped,
    CroppedDefault,
}

impl From<AspectArg> for AspectMode {
    fn from(arg: AspectArg) -> Self {
        match arg {
            AspectArg::Stretched => AspectMode::Stretched,
            AspectArg::Cropped => AspectMode::Cropped,
            AspectArg::CroppedDefault => AspectMode::CroppedDefault,
        }
    }
}

/// Drive that only reports what it was asked to do
struct LoggingDrive {
    side: u8,
}

impl DiskDrive for LoggingDrive {
    fn eject(&mut self) {
        info!("drive: eject");
    }

    fn select_next_side(&mut self) {
        self.side ^= 1;
        info!("drive: select side {}", if self.side == 0 { 'A' } else { 'B' });
    }

    fn insert(&mut self) {
        info!("drive: insert");
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = VideoConfig::load_or_default(&cli.config);
    if let Some(aspect) = cli.aspect {
        config.video.aspect_ratio = AspectMode::from(aspect).as_raw();
    }
    config.video.clip_sides |= cli.clip_sides;
    config.video.smooth_downscale |= cli.smooth;

    let mut session = Session::new(&config).context("invalid video configuration")?;
    session.frame_mut().test_pattern();

    let mut drive = LoggingDrive { side: 0 };
    for frame in 0..cli.frames {
        if cli.swap_at == Some(frame) {
            session.request_disk_swap();
        }
        session.present(&mut drive);
    }

    let screen = session
        .capture_screen(&cli.output)
        .context("failed to save screen capture")?;
    let source = session
        .capture_source(&cli.output)
        .context("failed to save source capture")?;

    println!("Presented {} frame(s)", session.frame_count());
    println!("Screen: {}", screen.display());
    println!("Source: {}", source.display());
    Ok(())
}
