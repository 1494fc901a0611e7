//! Card writer and keyboard-wedge reader for MIFARE Classic cards behind an MFRC522.
//!
//! One polling cycle handles at most one card: in Write mode a short identifier typed on
//! the host serial link is stored on a fixed block, in Read mode that block is replayed
//! to the host as keystrokes.
#![cfg_attr(not(test), no_std)]

pub mod com;
pub mod com_i2c;
pub mod com_spi;
pub mod config;
pub mod controller;
pub mod feedback;
pub mod host;
pub mod keymap;
pub mod link;
pub mod mfrc522;
pub mod mode;
pub mod picc;
pub mod read_path;
pub mod util;
pub mod write_path;

#[cfg(test)]
mod mock;

pub use config::Config;
pub use controller::{Controller, CycleError, Outcome, Phase};
pub use link::{CardLink, Key, Session, Uid};
pub use mfrc522::MFRC522;
pub use mode::Mode;
pub use picc::StatusCode;

/// Size of one MIFARE Classic data block.
pub const BLOCK_SIZE: usize = 16;
/// A block read returns the data plus two CRC_A bytes.
pub const READ_BUFFER_SIZE: usize = BLOCK_SIZE + 2;
