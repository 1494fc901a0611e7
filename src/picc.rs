use crate::com::MAX_TRANSFER;
use core::fmt;
use heapless::Vec;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    REQA = 0x26, // REQuest command, Type A. Invites PICCs in state IDLE to go to READY and prepare for anticollision or selection. 7 bit frame.
    CT = 0x88,   // Cascade Tag. Not really a command, but used during anti collision.
    SelCl1 = 0x93, // Anti collision/Select, Cascade Level 1
    SelCl2 = 0x95, // Anti collision/Select, Cascade Level 2
    SelCl3 = 0x97, // Anti collision/Select, Cascade Level 3
    HLTA = 0x50, // HaLT command, Type A. Instructs an ACTIVE PICC to go to state HALT.
    MfAuthKeyA = 0x60, // Perform authentication with Key A
    MfAuthKeyB = 0x61, // Perform authentication with Key B
    MfRead = 0x30,  // Reads one 16 byte block from the authenticated sector of the PICC.
    MfWrite = 0xA0, // Writes one 16 byte block to the authenticated sector of the PICC.
}

/// 4-bit ACK a MIFARE PICC sends after each write phase.
pub const MF_ACK: u8 = 0x0A;

/// Outcome of a failed exchange with the reader or the card.
///
/// The variants mirror the status codes of the reference MFRC522 firmware library, so a
/// report can name the code the way field technicians already know it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatusCode {
    /// The register bus (SPI/I2C) itself failed
    #[error("Error on the reader bus.")]
    Bus,
    #[error("Error in communication.")]
    Error,
    #[error("Collision detected.")]
    Collision,
    #[error("Timeout in communication.")]
    Timeout,
    #[error("A buffer is not big enough.")]
    NoRoom,
    #[error("Internal error in the code. Should not happen.")]
    InternalError,
    #[error("Invalid argument.")]
    Invalid,
    #[error("The CRC_A does not match.")]
    CrcWrong,
    #[error("A MIFARE PICC responded with NAK.")]
    MifareNack,
}

impl StatusCode {
    /// Symbolic name of the code.
    pub fn name(&self) -> &'static str {
        match self {
            StatusCode::Bus => "STATUS_BUS",
            StatusCode::Error => "STATUS_ERROR",
            StatusCode::Collision => "STATUS_COLLISION",
            StatusCode::Timeout => "STATUS_TIMEOUT",
            StatusCode::NoRoom => "STATUS_NO_ROOM",
            StatusCode::InternalError => "STATUS_INTERNAL_ERROR",
            StatusCode::Invalid => "STATUS_INVALID",
            StatusCode::CrcWrong => "STATUS_CRC_WRONG",
            StatusCode::MifareNack => "STATUS_MIFARE_NACK",
        }
    }
}

#[derive(Debug, Default)]
pub struct Response {
    pub data: Vec<u8, MAX_TRANSFER>,
    pub valid_bits: u8,
    pub had_collision: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Type {
    Unknown,
    Iso14443_4,    // PICC compliant with ISO/IEC 14443-4
    Iso18092,      // PICC compliant with ISO/IEC 18092 (NFC)
    MifareMini,    // MIFARE Classic protocol, 320 bytes
    Mifare1k,      // MIFARE Classic protocol, 1KB
    Mifare4k,      // MIFARE Classic protocol, 4KB
    MifareUL,      // MIFARE Ultralight or Ultralight C
    MifarePlus,    // MIFARE Plus
    TNP3XXX,       // Only mentioned in NXP AN 10833 MIFARE Type Identification Procedure
    NotComplete,   // SAK indicates UID is not complete.
}

impl Type {
    pub fn from_sak(sak: u8) -> Type {
        // http://www.nxp.com/documents/application_note/AN10833.pdf
        // 3.2 Coding of Select Acknowledge (SAK)
        // ignore 8-bit (iso14443 starts with LSBit = bit 1)
        match sak & 0x7F {
            0x04 => Type::NotComplete,
            0x09 => Type::MifareMini,
            0x08 => Type::Mifare1k,
            0x18 => Type::Mifare4k,
            0x00 => Type::MifareUL,
            0x10 | 0x11 => Type::MifarePlus,
            0x01 => Type::TNP3XXX,
            0x20 => Type::Iso14443_4,
            0x40 => Type::Iso18092,
            _ => Type::Unknown,
        }
    }

    /// Whether the card speaks the MIFARE Classic block protocol used here.
    pub fn is_mifare_classic(&self) -> bool {
        matches!(self, Type::MifareMini | Type::Mifare1k | Type::Mifare4k)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Unknown => "Unknown type",
            Type::Iso14443_4 => "PICC compliant with ISO/IEC 14443-4",
            Type::Iso18092 => "PICC compliant with ISO/IEC 18092 (NFC)",
            Type::MifareMini => "MIFARE Mini, 320 bytes",
            Type::Mifare1k => "MIFARE 1KB",
            Type::Mifare4k => "MIFARE 4KB",
            Type::MifareUL => "MIFARE Ultralight or Ultralight C",
            Type::MifarePlus => "MIFARE Plus",
            Type::TNP3XXX => "MIFARE TNP3XXX",
            Type::NotComplete => "SAK indicates UID is not complete.",
        };
        f.write_str(name)
    }
}
