use core::time::Duration;

/// A buzzer-like actuator.
pub trait Tone {
    /// Starts a tone that lasts until `no_tone`.
    fn tone(&mut self, freq_hz: u32);
    /// Starts a tone meant to last `duration`. Without a timer it may hold until `no_tone`.
    fn tone_for(&mut self, freq_hz: u32, duration: Duration);
    fn no_tone(&mut self);
}

/// For boards without a buzzer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Tone for Silent {
    fn tone(&mut self, _freq_hz: u32) {}
    fn tone_for(&mut self, _freq_hz: u32, _duration: Duration) {}
    fn no_tone(&mut self) {}
}

/// Audible cues tied to the phases of a cycle.
pub struct Feedback<T> {
    tone: T,
    freq_hz: u32,
    read_cue: Duration,
}

impl<T: Tone> Feedback<T> {
    pub fn new(tone: T, freq_hz: u32, read_cue: Duration) -> Self {
        Self {
            tone,
            freq_hz,
            read_cue,
        }
    }

    pub fn quiet(&mut self) {
        self.tone.no_tone();
    }

    /// Sustained tone while waiting for the host to type the identifier.
    pub fn prompting(&mut self) {
        self.tone.tone(self.freq_hz);
    }

    pub fn reading(&mut self) {
        self.tone.tone_for(self.freq_hz, self.read_cue);
    }

    pub fn release(self) -> T {
        self.tone
    }
}
