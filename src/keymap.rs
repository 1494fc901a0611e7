//! ASCII to USB HID keyboard usage IDs (US layout), for typing block contents through a
//! boot-protocol keyboard.

/// Left shift in the modifier byte of a boot keyboard report.
pub const MOD_LEFT_SHIFT: u8 = 0x02;

/// A key press: modifier byte and usage ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub modifier: u8,
    pub usage: u8,
}

impl KeyPress {
    const fn plain(usage: u8) -> Self {
        Self { modifier: 0, usage }
    }

    const fn shifted(usage: u8) -> Self {
        Self {
            modifier: MOD_LEFT_SHIFT,
            usage,
        }
    }

    /// 8-byte boot keyboard input report with this key down.
    pub fn report(&self) -> [u8; 8] {
        [self.modifier, 0, self.usage, 0, 0, 0, 0, 0]
    }
}

/// All keys up.
pub const RELEASE_REPORT: [u8; 8] = [0; 8];

/// Returns `None` for bytes with no key on a US keyboard.
pub fn key_for(byte: u8) -> Option<KeyPress> {
    let key = match byte {
        b'a'..=b'z' => KeyPress::plain(0x04 + (byte - b'a')),
        b'A'..=b'Z' => KeyPress::shifted(0x04 + (byte - b'A')),
        b'1'..=b'9' => KeyPress::plain(0x1E + (byte - b'1')),
        b'0' => KeyPress::plain(0x27),
        b'\n' | b'\r' => KeyPress::plain(0x28),
        b'\t' => KeyPress::plain(0x2B),
        b' ' => KeyPress::plain(0x2C),
        b'-' => KeyPress::plain(0x2D),
        b'=' => KeyPress::plain(0x2E),
        b'[' => KeyPress::plain(0x2F),
        b']' => KeyPress::plain(0x30),
        b'\\' => KeyPress::plain(0x31),
        b';' => KeyPress::plain(0x33),
        b'\'' => KeyPress::plain(0x34),
        b'`' => KeyPress::plain(0x35),
        b',' => KeyPress::plain(0x36),
        b'.' => KeyPress::plain(0x37),
        b'/' => KeyPress::plain(0x38),
        b'!' => KeyPress::shifted(0x1E),
        b'@' => KeyPress::shifted(0x1F),
        b'#' => KeyPress::shifted(0x20),
        b'$' => KeyPress::shifted(0x21),
        b'%' => KeyPress::shifted(0x22),
        b'^' => KeyPress::shifted(0x23),
        b'&' => KeyPress::shifted(0x24),
        b'*' => KeyPress::shifted(0x25),
        b'(' => KeyPress::shifted(0x26),
        b')' => KeyPress::shifted(0x27),
        b'_' => KeyPress::shifted(0x2D),
        b'+' => KeyPress::shifted(0x2E),
        b'{' => KeyPress::shifted(0x2F),
        b'}' => KeyPress::shifted(0x30),
        b'|' => KeyPress::shifted(0x31),
        b':' => KeyPress::shifted(0x33),
        b'"' => KeyPress::shifted(0x34),
        b'~' => KeyPress::shifted(0x35),
        b'<' => KeyPress::shifted(0x36),
        b'>' => KeyPress::shifted(0x37),
        b'?' => KeyPress::shifted(0x38),
        _ => return None,
    };
    Some(key)
}
