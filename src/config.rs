use crate::link::Key;
use core::time::Duration;

/// Everything a cycle needs besides the hardware handles.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The single block every cycle reads or writes.
    pub block: u8,
    pub key: Key,
    /// Ends host input before the block is full.
    pub delimiter: u8,
    /// Longest wait for the next input byte in Write mode.
    pub input_timeout: Duration,
    pub tone_hz: u32,
    pub read_cue: Duration,
    /// Also halt the card when authentication fails. Off by default, which keeps the
    /// card untouched on that path.
    pub teardown_on_auth_failure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block: 1,
            key: Key::DEFAULT,
            delimiter: b'#',
            input_timeout: Duration::from_secs(30),
            tone_hz: 2690,
            read_cue: Duration::from_millis(3000),
            teardown_on_auth_failure: false,
        }
    }
}

impl Config {
    /// Blocks 0 (manufacturer data) and every sector trailer are off limits.
    pub fn is_data_block(block: u8) -> bool {
        let trailer = if block < 128 {
            block % 4 == 3
        } else {
            block % 16 == 15
        };
        block != 0 && !trailer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.block, 1);
        assert_eq!(config.key.bytes, [0xFF; 6]);
        assert_eq!(config.input_timeout, Duration::from_secs(30));
        assert!(!config.teardown_on_auth_failure);
    }

    #[test]
    fn data_blocks() {
        assert!(Config::is_data_block(1));
        assert!(Config::is_data_block(2));
        assert!(!Config::is_data_block(0));
        assert!(!Config::is_data_block(3));
        assert!(!Config::is_data_block(7));
        assert!(Config::is_data_block(130));
        assert!(!Config::is_data_block(143));
    }
}
