use crate::picc::StatusCode;

/// Register access to the reader chip, independent of the physical bus.
///
/// `reg` is the plain register address (0x00..=0x3F); bus implementations apply their own
/// address encoding.
pub trait Com {
    fn read(&mut self, reg: u8, value: &mut [u8]) -> Result<(), StatusCode>;
    fn write(&mut self, reg: u8, value: &[u8]) -> Result<(), StatusCode>;
}

/// The FIFO is the largest register payload moved in one operation.
pub const MAX_TRANSFER: usize = 64;
