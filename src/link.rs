//! The card-facing capability the transaction core drives, and the per-cycle session
//! scoped over it.

use crate::picc::StatusCode;
use crate::{BLOCK_SIZE, READ_BUFFER_SIZE};
use heapless::Vec;
use log::warn;

/// Card serial number. Single, double and triple size UIDs have 4, 7 and 10 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Uid {
    bytes: Vec<u8, 10>,
    sak: u8,
}

impl Uid {
    pub fn new(bytes: &[u8], sak: u8) -> Result<Self, StatusCode> {
        if !matches!(bytes.len(), 4 | 7 | 10) {
            return Err(StatusCode::Invalid);
        }
        let bytes = Vec::from_slice(bytes).map_err(|_| StatusCode::NoRoom)?;
        Ok(Self { bytes, sak })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The SAK byte returned after the final cascade level.
    pub fn sak(&self) -> u8 {
        self.sak
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    A,
    B,
}

/// Sector key for MIFARE Classic authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub kind: KeyType,
    pub bytes: [u8; 6],
}

impl Key {
    /// Factory transport key, FFFFFFFFFFFFh on delivered cards.
    pub const DEFAULT: Key = Key {
        kind: KeyType::A,
        bytes: [0xFF; 6],
    };
}

impl Default for Key {
    fn default() -> Self {
        Key::DEFAULT
    }
}

/// Detect, authenticate, read, write and halt operations on a contactless card.
pub trait CardLink {
    /// Ok when a card in IDLE state answered a request.
    fn card_present(&mut self) -> Result<(), StatusCode>;
    /// Runs anticollision/select and returns the selected card's UID.
    fn read_serial(&mut self) -> Result<Uid, StatusCode>;
    fn authenticate(&mut self, block: u8, key: &Key, uid: &Uid) -> Result<(), StatusCode>;
    fn write_block(&mut self, block: u8, data: &[u8; BLOCK_SIZE]) -> Result<(), StatusCode>;
    /// Fills `buffer` and returns how many bytes the card sent.
    fn read_block(
        &mut self,
        block: u8,
        buffer: &mut [u8; READ_BUFFER_SIZE],
    ) -> Result<usize, StatusCode>;
    fn halt(&mut self) -> Result<(), StatusCode>;
    fn stop_cipher(&mut self) -> Result<(), StatusCode>;
}

impl<L: CardLink + ?Sized> CardLink for &mut L {
    fn card_present(&mut self) -> Result<(), StatusCode> {
        (**self).card_present()
    }
    fn read_serial(&mut self) -> Result<Uid, StatusCode> {
        (**self).read_serial()
    }
    fn authenticate(&mut self, block: u8, key: &Key, uid: &Uid) -> Result<(), StatusCode> {
        (**self).authenticate(block, key, uid)
    }
    fn write_block(&mut self, block: u8, data: &[u8; BLOCK_SIZE]) -> Result<(), StatusCode> {
        (**self).write_block(block, data)
    }
    fn read_block(
        &mut self,
        block: u8,
        buffer: &mut [u8; READ_BUFFER_SIZE],
    ) -> Result<usize, StatusCode> {
        (**self).read_block(block, buffer)
    }
    fn halt(&mut self) -> Result<(), StatusCode> {
        (**self).halt()
    }
    fn stop_cipher(&mut self) -> Result<(), StatusCode> {
        (**self).stop_cipher()
    }
}

/// One selected card for the length of one cycle.
///
/// Dropping the session halts the card and stops the cipher, so the card never stays in
/// an authenticated state into the next detection poll.
pub struct Session<'a, L: CardLink + ?Sized> {
    link: &'a mut L,
    uid: Uid,
    authenticated: bool,
    teardown: bool,
}

impl<'a, L: CardLink + ?Sized> Session<'a, L> {
    pub fn new(link: &'a mut L, uid: Uid) -> Self {
        Self {
            link,
            uid,
            authenticated: false,
            teardown: true,
        }
    }

    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn authenticate(&mut self, block: u8, key: &Key) -> Result<(), StatusCode> {
        self.link.authenticate(block, key, &self.uid)?;
        self.authenticated = true;
        Ok(())
    }

    pub fn link(&mut self) -> &mut L {
        &mut *self.link
    }

    /// Ends the session without halting the card or stopping the cipher.
    pub fn abandon(mut self) {
        self.teardown = false;
    }
}

impl<L: CardLink + ?Sized> Drop for Session<'_, L> {
    fn drop(&mut self) {
        if !self.teardown {
            return;
        }
        if let Err(e) = self.link.halt() {
            warn!("halt failed: {} ({})", e.name(), e);
        }
        if let Err(e) = self.link.stop_cipher() {
            warn!("stop crypto failed: {} ({})", e.name(), e);
        }
    }
}
