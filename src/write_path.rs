use crate::config::Config;
use crate::feedback::{Feedback, Tone};
use crate::host::HostChannel;
use crate::link::CardLink;
use crate::picc::StatusCode;
use crate::BLOCK_SIZE;
use log::{debug, info, warn};

/// Pads host input to a full block with spaces. Input longer than a block never gets
/// here: the host read is bounded by the block size.
pub fn encode_payload(input: &[u8]) -> [u8; BLOCK_SIZE] {
    let mut payload = [b' '; BLOCK_SIZE];
    let n = input.len().min(BLOCK_SIZE);
    payload[..n].copy_from_slice(&input[..n]);
    payload
}

/// Prompts the host for an identifier and stores it on the configured block.
///
/// The cue sounds from the prompt until the write finishes either way. A host that
/// stays silent past the timeout gets an all-blank block written.
pub fn write<H, L, T>(
    host: &mut H,
    link: &mut L,
    feedback: &mut Feedback<T>,
    config: &Config,
) -> Result<[u8; BLOCK_SIZE], StatusCode>
where
    H: HostChannel + ?Sized,
    L: CardLink + ?Sized,
    T: Tone,
{
    feedback.prompting();
    host.write_line(format_args!("Enter number to write"));

    let mut buf = [0u8; BLOCK_SIZE];
    let len = host.read_bytes_until(config.delimiter, &mut buf, config.input_timeout);
    debug!("host sent {} byte(s)", len);
    let payload = encode_payload(&buf[..len]);

    let result = link.write_block(config.block, &payload);
    match result {
        Ok(()) => {
            info!("block {} written", config.block);
            host.write_line(format_args!("Number written to card successfully"));
        }
        Err(status) => {
            warn!("write of block {} failed: {}", config.block, status.name());
            host.write_line(format_args!("Unable to write data to the card"));
            host.write_line(format_args!("{}", status.name()));
        }
    }
    feedback.quiet();
    result.map(|()| payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Call, FakeHost, FakeLink, ToneLog};
    use core::time::Duration;

    fn run(host: &mut FakeHost, link: &mut FakeLink) -> Result<[u8; 16], StatusCode> {
        let mut feedback = Feedback::new(ToneLog::default(), 2690, Duration::from_secs(3));
        write(host, link, &mut feedback, &Config::default())
    }

    #[test]
    fn short_input_is_space_padded() {
        for input in ["", "7", "123456789012", "123456789012345"] {
            let payload = encode_payload(input.as_bytes());
            assert_eq!(&payload[..input.len()], input.as_bytes());
            assert!(payload[input.len()..].iter().all(|&b| b == b' '));
        }
    }

    #[test]
    fn full_input_is_unchanged() {
        assert_eq!(&encode_payload(b"1234567890123456"), b"1234567890123456");
    }

    #[test]
    fn writes_padded_block() {
        let mut host = FakeHost::typing(b"123456789012#");
        let mut link = FakeLink::default();
        let payload = run(&mut host, &mut link).unwrap();
        assert_eq!(&payload, b"123456789012    ");
        assert_eq!(link.calls, vec![Call::Write(1, *b"123456789012    ")]);
        assert_eq!(
            host.lines,
            vec!["Enter number to write", "Number written to card successfully"]
        );
    }

    #[test]
    fn silent_host_writes_blanks() {
        let mut host = FakeHost::typing(b"");
        let mut link = FakeLink::default();
        assert_eq!(run(&mut host, &mut link).unwrap(), [b' '; 16]);
    }

    #[test]
    fn failed_write_reports_status_and_silences() {
        let mut host = FakeHost::typing(b"42#");
        let mut link = FakeLink {
            write: Err(StatusCode::Timeout),
            ..Default::default()
        };
        let mut feedback = Feedback::new(ToneLog::default(), 2690, Duration::from_secs(3));
        let result = write(&mut host, &mut link, &mut feedback, &Config::default());
        assert_eq!(result, Err(StatusCode::Timeout));
        assert_eq!(
            host.lines[1..].to_vec(),
            vec!["Unable to write data to the card", "STATUS_TIMEOUT"]
        );
        assert_eq!(feedback.release().events, vec!["tone 2690", "no_tone"]);
    }
}
