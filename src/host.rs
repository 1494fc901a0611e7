use core::fmt;
use core::time::Duration;

/// The connected host: a byte stream carrying prompts and typed input, plus a virtual
/// keyboard typing into whatever has the host's input focus.
///
/// Transport failures are the implementation's business; the transaction core treats
/// every call as best effort.
pub trait HostChannel {
    /// Reads into `buf` until `delimiter` arrives, `buf` is full, or no byte arrives
    /// within `timeout`. The delimiter is consumed but not stored. Returns the count stored.
    fn read_bytes_until(&mut self, delimiter: u8, buf: &mut [u8], timeout: Duration) -> usize;
    /// Writes one line of text to the host stream.
    fn write_line(&mut self, args: fmt::Arguments<'_>);
    fn keyboard_begin(&mut self);
    /// Types a single character at the host's cursor. False when the key was not sent,
    /// e.g. a byte with no key or a keyboard that never opened.
    fn keystroke(&mut self, byte: u8) -> bool;
    fn keyboard_end(&mut self);
}

/// Keyboard session for the length of one emission burst.
pub struct Keyboard<'a, H: HostChannel + ?Sized> {
    host: &'a mut H,
}

impl<'a, H: HostChannel + ?Sized> Keyboard<'a, H> {
    pub fn open(host: &'a mut H) -> Self {
        host.keyboard_begin();
        Self { host }
    }

    /// Whether the host accepted the key.
    pub fn write(&mut self, byte: u8) -> bool {
        self.host.keystroke(byte)
    }
}

impl<H: HostChannel + ?Sized> Drop for Keyboard<'_, H> {
    fn drop(&mut self) {
        self.host.keyboard_end();
    }
}
