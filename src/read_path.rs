use crate::config::Config;
use crate::feedback::{Feedback, Tone};
use crate::host::{HostChannel, Keyboard};
use crate::link::CardLink;
use crate::picc::StatusCode;
use crate::{BLOCK_SIZE, READ_BUFFER_SIZE};
use log::{info, warn};

/// Bytes of a block that get typed: the data part only, spaces dropped.
pub fn keystrokes(block: &[u8]) -> impl Iterator<Item = u8> + '_ {
    block
        .iter()
        .take(BLOCK_SIZE)
        .copied()
        .filter(|&b| b != b' ')
}

/// Reads the configured block and types its contents into the host.
///
/// Returns the number of keystrokes the host accepted.
pub fn read<H, L, T>(
    host: &mut H,
    link: &mut L,
    feedback: &mut Feedback<T>,
    config: &Config,
) -> Result<usize, StatusCode>
where
    H: HostChannel + ?Sized,
    L: CardLink + ?Sized,
    T: Tone,
{
    feedback.reading();

    let mut buffer = [0u8; READ_BUFFER_SIZE];
    let len = match link.read_block(config.block, &mut buffer) {
        Ok(len) => len,
        Err(status) => {
            warn!("read of block {} failed: {}", config.block, status.name());
            host.write_line(format_args!("Unable to read data from the card."));
            host.write_line(format_args!("{}", status.name()));
            return Err(status);
        }
    };

    let mut sent = 0;
    {
        let mut keyboard = Keyboard::open(host);
        for byte in keystrokes(&buffer[..len]) {
            if keyboard.write(byte) {
                sent += 1;
            }
        }
    }
    info!("block {} typed as {} keystroke(s)", config.block, sent);
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{FakeHost, FakeLink, HostEvent, ToneLog};
    use core::time::Duration;

    fn feedback() -> Feedback<ToneLog> {
        Feedback::new(ToneLog::default(), 2690, Duration::from_millis(3000))
    }

    #[test]
    fn spaces_and_crc_are_never_typed() {
        let mut block = [b' '; 18];
        block[..5].copy_from_slice(b"1 2 3");
        block[16] = b'9';
        block[17] = b'9';
        let typed: Vec<u8> = keystrokes(&block).collect();
        assert_eq!(typed, b"123");
    }

    #[test]
    fn embedded_bytes_keep_order() {
        let typed: Vec<u8> = keystrokes(b"ab  cd\x00ef").collect();
        assert_eq!(typed, b"abcd\x00ef");
    }

    #[test]
    fn types_block_inside_keyboard_session() {
        let mut host = FakeHost::default();
        let mut link = FakeLink::with_block(*b"123456789012    ");
        let mut feedback = feedback();
        let sent = read(&mut host, &mut link, &mut feedback, &Config::default()).unwrap();

        assert_eq!(sent, 12);
        assert_eq!(host.typed(), b"123456789012");
        assert_eq!(host.events.first(), Some(&HostEvent::Begin));
        assert_eq!(host.events.last(), Some(&HostEvent::End));
        assert_eq!(feedback.release().events, vec!["tone 2690 for 3000ms"]);
    }

    #[test]
    fn dropped_keys_are_not_counted() {
        let mut block = [0u8; 16];
        block[..2].copy_from_slice(b"42");
        let mut host = FakeHost {
            unmapped: vec![0x00],
            ..Default::default()
        };
        let mut link = FakeLink::with_block(block);
        let sent = read(&mut host, &mut link, &mut feedback(), &Config::default()).unwrap();
        assert_eq!(sent, 2);
        assert_eq!(host.typed(), b"42");
    }

    #[test]
    fn failed_read_types_nothing() {
        let mut host = FakeHost::default();
        let mut link = FakeLink {
            read: Err(StatusCode::CrcWrong),
            ..Default::default()
        };
        let result = read(&mut host, &mut link, &mut feedback(), &Config::default());
        assert_eq!(result, Err(StatusCode::CrcWrong));
        assert!(host.events.is_empty());
        assert_eq!(
            host.lines,
            vec!["Unable to read data from the card.", "STATUS_CRC_WRONG"]
        );
    }
}
