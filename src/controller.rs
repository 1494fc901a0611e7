//! The per-cycle card transaction.
//!
//! A cycle walks `Idle -> Detected -> Authenticated -> Writing | Reading -> Done`. Every
//! step is a gate: a failure ends the cycle and the caller simply polls again. Once a
//! card is authenticated the session is always torn down (halt + stop crypto), whatever
//! the write or read did.
//!
//! A failed authentication leaves the card as it is and returns to `Idle` without
//! tearing down, unless [`Config::teardown_on_auth_failure`] is set. The next poll only
//! sees cards in IDLE state, so a card left selected is picked up again once it has
//! left the field and come back.

use crate::config::Config;
use crate::feedback::{Feedback, Tone};
use crate::host::HostChannel;
use crate::link::{CardLink, Session};
use crate::mode::{Mode, ModeSelector};
use crate::picc::StatusCode;
use crate::{read_path, write_path, BLOCK_SIZE};
use embedded_hal::digital::v2::InputPin;
use log::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Detected,
    Authenticated,
    Writing,
    Reading,
    Done,
}

/// What a completed cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The block as committed to the card.
    Written([u8; BLOCK_SIZE]),
    /// Number of keystrokes typed into the host.
    Typed(usize),
}

/// Why a cycle ended early. None of these outlive the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
    #[error("no card present")]
    NoCardPresent,
    #[error("card serial could not be read")]
    SerialReadFailed,
    #[error("authentication failed: {}", .0.name())]
    AuthenticationFailed(StatusCode),
    #[error("write failed: {}", .0.name())]
    WriteFailed(StatusCode),
    #[error("read failed: {}", .0.name())]
    ReadFailed(StatusCode),
}

impl CycleError {
    /// Whether the host was told about this failure. An empty reader field is not news.
    pub fn is_reported(&self) -> bool {
        !matches!(self, CycleError::NoCardPresent | CycleError::SerialReadFailed)
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CycleError::AuthenticationFailed(s)
            | CycleError::WriteFailed(s)
            | CycleError::ReadFailed(s) => Some(*s),
            _ => None,
        }
    }
}

pub struct Controller<'a, L: ?Sized, H: ?Sized, P, T> {
    link: &'a mut L,
    host: &'a mut H,
    selector: ModeSelector<P>,
    feedback: Feedback<T>,
    config: Config,
    phase: Phase,
}

fn enter(phase: &mut Phase, next: Phase) {
    trace!("{:?} -> {:?}", phase, next);
    *phase = next;
}

impl<'a, L, H, P, T> Controller<'a, L, H, P, T>
where
    L: CardLink + ?Sized,
    H: HostChannel + ?Sized,
    P: InputPin,
    T: Tone,
{
    pub fn new(
        link: &'a mut L,
        host: &'a mut H,
        selector: ModeSelector<P>,
        feedback: Feedback<T>,
        config: Config,
    ) -> Self {
        Self {
            link,
            host,
            selector,
            feedback,
            config,
            phase: Phase::Idle,
        }
    }

    /// The phase the last cycle ended in.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn release(self) -> (ModeSelector<P>, Feedback<T>) {
        (self.selector, self.feedback)
    }

    /// Runs one polling cycle. Never blocks except while waiting for host input in
    /// Write mode.
    pub fn run_cycle(&mut self) -> Result<Outcome, CycleError> {
        self.feedback.quiet();
        self.phase = Phase::Idle;

        self.link
            .card_present()
            .map_err(|_| CycleError::NoCardPresent)?;
        let uid = self
            .link
            .read_serial()
            .map_err(|_| CycleError::SerialReadFailed)?;
        debug!("card {:02x?} (SAK {:#04x})", uid.bytes(), uid.sak());
        enter(&mut self.phase, Phase::Detected);

        let mode = self.selector.read_mode();
        let mut session = Session::new(&mut *self.link, uid);

        if let Err(status) = session.authenticate(self.config.block, &self.config.key) {
            warn!(
                "authentication of block {} failed: {}",
                self.config.block,
                status.name()
            );
            self.host.write_line(format_args!("Authentication Failed"));
            self.host.write_line(format_args!("{}", status.name()));
            if !self.config.teardown_on_auth_failure {
                session.abandon();
            }
            enter(&mut self.phase, Phase::Idle);
            return Err(CycleError::AuthenticationFailed(status));
        }
        enter(&mut self.phase, Phase::Authenticated);

        let result = match mode {
            Mode::Write => {
                enter(&mut self.phase, Phase::Writing);
                write_path::write(
                    &mut *self.host,
                    session.link(),
                    &mut self.feedback,
                    &self.config,
                )
                .map(Outcome::Written)
                .map_err(CycleError::WriteFailed)
            }
            Mode::Read => {
                enter(&mut self.phase, Phase::Reading);
                read_path::read(
                    &mut *self.host,
                    session.link(),
                    &mut self.feedback,
                    &self.config,
                )
                .map(Outcome::Typed)
                .map_err(CycleError::ReadFailed)
            }
        };

        drop(session);
        enter(&mut self.phase, Phase::Done);
        result
    }
}
