//! Scripted stand-ins for the hardware seams, shared by the unit tests.

use crate::feedback::Tone;
use crate::host::HostChannel;
use crate::link::{CardLink, Key, Uid};
use crate::picc::StatusCode;
use crate::{BLOCK_SIZE, READ_BUFFER_SIZE};
use core::fmt;
use core::time::Duration;
use embedded_hal::digital::v2::InputPin;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Present,
    Serial,
    Authenticate(u8),
    Write(u8, [u8; BLOCK_SIZE]),
    Read(u8),
    Halt,
    StopCipher,
}

pub struct FakeLink {
    pub calls: Vec<Call>,
    pub present: Result<(), StatusCode>,
    pub serial: Result<Uid, StatusCode>,
    pub auth: Result<(), StatusCode>,
    pub write: Result<(), StatusCode>,
    pub read: Result<(), StatusCode>,
    pub halt: Result<(), StatusCode>,
    /// Card memory for the one block under test.
    pub block: [u8; BLOCK_SIZE],
}

impl Default for FakeLink {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            present: Ok(()),
            serial: Uid::new(&[0x04, 0x3A, 0x91, 0x5C], 0x08),
            auth: Ok(()),
            write: Ok(()),
            read: Ok(()),
            halt: Ok(()),
            block: [0; BLOCK_SIZE],
        }
    }
}

impl FakeLink {
    pub fn with_block(block: [u8; BLOCK_SIZE]) -> Self {
        Self {
            block,
            ..Default::default()
        }
    }

    pub fn touched_data(&self) -> bool {
        self.calls
            .iter()
            .any(|c| matches!(c, Call::Write(..) | Call::Read(_)))
    }
}

impl CardLink for FakeLink {
    fn card_present(&mut self) -> Result<(), StatusCode> {
        self.calls.push(Call::Present);
        self.present
    }
    fn read_serial(&mut self) -> Result<Uid, StatusCode> {
        self.calls.push(Call::Serial);
        self.serial.clone()
    }
    fn authenticate(&mut self, block: u8, _key: &Key, _uid: &Uid) -> Result<(), StatusCode> {
        self.calls.push(Call::Authenticate(block));
        self.auth
    }
    fn write_block(&mut self, block: u8, data: &[u8; BLOCK_SIZE]) -> Result<(), StatusCode> {
        self.calls.push(Call::Write(block, *data));
        self.write?;
        self.block = *data;
        Ok(())
    }
    fn read_block(
        &mut self,
        block: u8,
        buffer: &mut [u8; READ_BUFFER_SIZE],
    ) -> Result<usize, StatusCode> {
        self.calls.push(Call::Read(block));
        self.read?;
        buffer[..BLOCK_SIZE].copy_from_slice(&self.block);
        buffer[BLOCK_SIZE..].copy_from_slice(&[0xAB, 0xCD]);
        Ok(READ_BUFFER_SIZE)
    }
    fn halt(&mut self) -> Result<(), StatusCode> {
        self.calls.push(Call::Halt);
        self.halt
    }
    fn stop_cipher(&mut self) -> Result<(), StatusCode> {
        self.calls.push(Call::StopCipher);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Begin,
    Key(u8),
    End,
}

/// Host whose typed input is scripted up front; an exhausted script behaves like the
/// read timing out.
#[derive(Default)]
pub struct FakeHost {
    pub input: VecDeque<u8>,
    pub lines: Vec<String>,
    pub events: Vec<HostEvent>,
    pub timeouts: Vec<Duration>,
    /// Bytes the keyboard cannot type.
    pub unmapped: Vec<u8>,
}

impl FakeHost {
    pub fn typing(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn typed(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Key(b) => Some(*b),
                _ => None,
            })
            .collect()
    }
}

impl HostChannel for FakeHost {
    fn read_bytes_until(&mut self, delimiter: u8, buf: &mut [u8], timeout: Duration) -> usize {
        self.timeouts.push(timeout);
        let mut n = 0;
        while n < buf.len() {
            match self.input.pop_front() {
                Some(b) if b == delimiter => break,
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }
    fn write_line(&mut self, args: fmt::Arguments<'_>) {
        self.lines.push(args.to_string());
    }
    fn keyboard_begin(&mut self) {
        self.events.push(HostEvent::Begin);
    }
    fn keystroke(&mut self, byte: u8) -> bool {
        if self.unmapped.contains(&byte) {
            return false;
        }
        self.events.push(HostEvent::Key(byte));
        true
    }
    fn keyboard_end(&mut self) {
        self.events.push(HostEvent::End);
    }
}

pub struct FakePin(Result<bool, ()>);

impl FakePin {
    pub fn high() -> Self {
        FakePin(Ok(true))
    }
    pub fn low() -> Self {
        FakePin(Ok(false))
    }
    pub fn broken() -> Self {
        FakePin(Err(()))
    }
}

impl InputPin for FakePin {
    type Error = ();
    fn is_high(&self) -> Result<bool, ()> {
        self.0
    }
    fn is_low(&self) -> Result<bool, ()> {
        self.0.map(|high| !high)
    }
}

#[derive(Default)]
pub struct ToneLog {
    pub events: Vec<String>,
}

impl Tone for ToneLog {
    fn tone(&mut self, freq_hz: u32) {
        self.events.push(format!("tone {}", freq_hz));
    }
    fn tone_for(&mut self, freq_hz: u32, duration: Duration) {
        self.events
            .push(format!("tone {} for {}ms", freq_hz, duration.as_millis()));
    }
    fn no_tone(&mut self) {
        self.events.push("no_tone".to_string());
    }
}
