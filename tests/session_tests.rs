// Integration tests for the frontend session
// Covers the disk swap cadence and screen upkeep as seen through `Session::present`

use nes_lcd::disk::{DiskDrive, SwapState};
use nes_lcd::display::Region;
use nes_lcd::frontend::{Session, VideoConfig};

#[derive(Default)]
struct CountingDrive {
    ejects: u32,
    selects: u32,
    inserts: u32,
}

impl DiskDrive for CountingDrive {
    fn eject(&mut self) {
        self.ejects += 1;
    }
    fn select_next_side(&mut self) {
        self.selects += 1;
    }
    fn insert(&mut self) {
        self.inserts += 1;
    }
}

#[test]
fn test_disk_swap_paced_by_frames() {
    let mut session = Session::new(&VideoConfig::default()).unwrap();
    let mut drive = CountingDrive::default();

    session.request_disk_swap();
    for _ in 0..59 {
        session.present(&mut drive);
    }
    assert_eq!(drive.ejects, 1);
    assert_eq!(drive.inserts, 0, "insert issued too early");

    for _ in 59..70 {
        session.present(&mut drive);
    }
    assert_eq!((drive.selects, drive.inserts), (1, 1));
    assert_eq!(session.sequencer().state(), SwapState::Settling);

    for _ in 70..270 {
        session.present(&mut drive);
    }
    assert_eq!(session.sequencer().state(), SwapState::Idle);
    assert_eq!((drive.ejects, drive.selects, drive.inserts), (1, 1, 1));
    assert_eq!(session.frame_count(), 270);
}

#[test]
fn test_presenting_without_swap_touches_no_drive() {
    let mut session = Session::new(&VideoConfig::default()).unwrap();
    let mut drive = CountingDrive::default();
    for _ in 0..100 {
        session.present(&mut drive);
    }
    assert_eq!((drive.ejects, drive.selects, drive.inserts), (0, 0, 0));
}

#[test]
fn test_config_changes_reach_engine() {
    let config: VideoConfig = toml::from_str(
        r#"
        [video]
        aspect_ratio = 7
        clip_sides = true
        smooth_downscale = true
        "#,
    )
    .unwrap();
    let mut session = Session::new(&config).unwrap();
    assert!(session.engine().clip_sides());
    assert!(session.engine().smooth_downscale());

    // Out-of-range aspect setting is corrected on the first frame
    assert_eq!(session.engine().aspect_mode_raw(), 7);
    session.present(&mut CountingDrive::default());
    assert_eq!(session.engine().aspect_mode_raw(), 2);
}

#[test]
fn test_region_switch_clears_stale_border() {
    let mut session = Session::new(&VideoConfig::default()).unwrap();
    let mut drive = CountingDrive::default();
    session.frame_mut().clear(0x30);

    session.set_visible_lines(Region::Pal.visible_lines());
    session.present(&mut drive);
    assert_ne!(session.screen_memory()[0], 0);

    // 224 NTSC lines are centred on the 240-line screen, leaving 8 border rows
    session.set_visible_lines(Region::Ntsc.visible_lines());
    session.present(&mut drive);
    let mem = session.screen_memory();
    assert!(mem[..8 * 240].iter().all(|&p| p == 0));
    assert!(mem[232 * 240..240 * 240].iter().all(|&p| p == 0));
    assert_ne!(mem[8 * 240], 0);
}
