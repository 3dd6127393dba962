// Disk module - Frame-paced Famicom Disk System side swaps
//
// Flipping a disk is three separate drive actions (eject, pick the other
// side, insert) that the BIOS only accepts when spaced out over many frames.

pub mod sequencer;

pub use sequencer::{
    DiskDrive, DiskSwapSequencer, SwapState, INSERT_DELAY_FRAMES, SETTLE_DELAY_FRAMES,
};
