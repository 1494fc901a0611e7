use embedded_hal::digital::v2::InputPin;

/// What a cycle does with the card in front of the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Store an identifier typed on the host.
    Write,
    /// Type the stored identifier into the host.
    Read,
}

/// Mode switch on a single digital input. High selects Write.
///
/// The pin is sampled once per call with no debouncing.
pub struct ModeSelector<P> {
    pin: P,
}

impl<P: InputPin> ModeSelector<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn read_mode(&self) -> Mode {
        // an unreadable pin falls back to the non-destructive path
        match self.pin.is_high() {
            Ok(true) => Mode::Write,
            _ => Mode::Read,
        }
    }

    pub fn release(self) -> P {
        self.pin
    }
}
