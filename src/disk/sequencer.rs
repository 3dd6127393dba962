//! Disk swap sequencer
//!
//! A small state machine clocked once per rendered frame. After a swap is
//! requested it ejects the disk on the next tick, waits before selecting the
//! other side and inserting it, then waits again before accepting the next
//! request. The frame cadence is the only clock; no wall time is involved.

use log::{debug, info};

/// Ticks to wait after ejecting before the new side goes in
pub const INSERT_DELAY_FRAMES: u32 = 60;

/// Ticks to wait after inserting before another swap is accepted
pub const SETTLE_DELAY_FRAMES: u32 = 200;

/// The drive actions the sequencer issues
pub trait DiskDrive {
    /// Take the current disk out of the drive
    fn eject(&mut self);

    /// Choose the next disk side
    fn select_next_side(&mut self);

    /// Put the selected side into the drive
    fn insert(&mut self);
}

/// Sequencer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapState {
    /// No swap in progress
    Idle,
    /// Swap requested; eject on the next tick
    Ejecting,
    /// Disk out; waiting to insert the other side
    Reinserting,
    /// Disk in; waiting for the drive to settle
    Settling,
}

/// Frame-clocked disk swap state machine
#[derive(Debug, Clone)]
pub struct DiskSwapSequencer {
    state: SwapState,
    /// Ticks since the last state change
    counter: u32,
}

impl DiskSwapSequencer {
    /// Create an idle sequencer
    pub fn new() -> Self {
        Self {
            state: SwapState::Idle,
            counter: 0,
        }
    }

    /// Arm a swap
    ///
    /// Requests made while a swap is already running are dropped; the
    /// running swap finishes on its own schedule.
    pub fn request_swap(&mut self) {
        if self.state != SwapState::Idle {
            debug!("Disk swap already in progress ({:?}), request ignored", self.state);
            return;
        }
        self.state = SwapState::Ejecting;
        self.counter = 0;
    }

    pub fn state(&self) -> SwapState {
        self.state
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn is_busy(&self) -> bool {
        self.state != SwapState::Idle
    }

    /// Advance by one frame, issuing any drive actions that are due
    pub fn tick<D: DiskDrive + ?Sized>(&mut self, drive: &mut D) {
        match self.state {
            SwapState::Idle => {}
            SwapState::Ejecting => {
                info!("Ejecting disk");
                drive.eject();
                self.enter(SwapState::Reinserting);
            }
            SwapState::Reinserting => {
                if self.counter > INSERT_DELAY_FRAMES {
                    info!("Inserting other disk side");
                    drive.select_next_side();
                    drive.insert();
                    self.enter(SwapState::Settling);
                }
            }
            SwapState::Settling => {
                if self.counter > SETTLE_DELAY_FRAMES {
                    debug!("Disk swap complete");
                    self.enter(SwapState::Idle);
                }
            }
        }
        self.counter = self.counter.saturating_add(1);
    }

    fn enter(&mut self, state: SwapState) {
        self.state = state;
        self.counter = 0;
    }
}

impl Default for DiskSwapSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Action {
        Eject,
        Select,
        Insert,
    }

    /// Drive that records each action with the tick it arrived on
    #[derive(Default)]
    struct RecordingDrive {
        tick: u32,
        actions: Vec<(u32, Action)>,
    }

    impl DiskDrive for RecordingDrive {
        fn eject(&mut self) {
            self.actions.push((self.tick, Action::Eject));
        }
        fn select_next_side(&mut self) {
            self.actions.push((self.tick, Action::Select));
        }
        fn insert(&mut self) {
            self.actions.push((self.tick, Action::Insert));
        }
    }

    fn run(seq: &mut DiskSwapSequencer, drive: &mut RecordingDrive, ticks: u32) {
        for _ in 0..ticks {
            drive.tick += 1;
            seq.tick(drive);
        }
    }

    #[test]
    fn test_idle_issues_nothing() {
        let mut seq = DiskSwapSequencer::new();
        let mut drive = RecordingDrive::default();
        run(&mut seq, &mut drive, 500);
        assert!(drive.actions.is_empty());
        assert_eq!(seq.state(), SwapState::Idle);
    }

    #[test]
    fn test_full_swap_timing() {
        let mut seq = DiskSwapSequencer::new();
        let mut drive = RecordingDrive::default();
        seq.request_swap();
        assert_eq!(seq.state(), SwapState::Ejecting);

        run(&mut seq, &mut drive, 1);
        assert_eq!(drive.actions, vec![(1, Action::Eject)]);
        assert_eq!(seq.state(), SwapState::Reinserting);

        run(&mut seq, &mut drive, 58);
        assert_eq!(drive.actions.len(), 1, "insert issued before tick 60");

        run(&mut seq, &mut drive, 300);
        assert_eq!(
            drive.actions,
            vec![(1, Action::Eject), (62, Action::Select), (62, Action::Insert)]
        );
        assert_eq!(seq.state(), SwapState::Idle);
    }

    #[test]
    fn test_returns_to_idle_after_settling() {
        let mut seq = DiskSwapSequencer::new();
        let mut drive = RecordingDrive::default();
        seq.request_swap();

        run(&mut seq, &mut drive, 262);
        assert_eq!(seq.state(), SwapState::Settling);
        run(&mut seq, &mut drive, 1);
        assert_eq!(seq.state(), SwapState::Idle);
    }

    #[test]
    fn test_request_during_swap_is_ignored() {
        let mut seq = DiskSwapSequencer::new();
        let mut drive = RecordingDrive::default();
        seq.request_swap();
        run(&mut seq, &mut drive, 30);

        seq.request_swap();
        assert_eq!(seq.state(), SwapState::Reinserting);
        run(&mut seq, &mut drive, 400);

        let ejects = drive.actions.iter().filter(|(_, a)| *a == Action::Eject).count();
        let inserts = drive.actions.iter().filter(|(_, a)| *a == Action::Insert).count();
        assert_eq!((ejects, inserts), (1, 1));
    }

    #[test]
    fn test_request_after_completion_starts_again() {
        let mut seq = DiskSwapSequencer::new();
        let mut drive = RecordingDrive::default();
        seq.request_swap();
        run(&mut seq, &mut drive, 300);
        assert!(!seq.is_busy());

        seq.request_swap();
        run(&mut seq, &mut drive, 1);
        assert_eq!(drive.actions.last(), Some(&(301, Action::Eject)));
    }

    #[test]
    fn test_works_with_trait_object() {
        let mut seq = DiskSwapSequencer::new();
        let mut drive = RecordingDrive::default();
        seq.request_swap();
        let dyn_drive: &mut dyn DiskDrive = &mut drive;
        seq.tick(dyn_drive);
        assert_eq!(drive.actions.len(), 1);
    }
}
