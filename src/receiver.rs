//! Receive sessions.
//!
//! A [`ReceiveSession`] owns everything needed to turn a stream of
//! [`DetectionEvent`]s into a message: the run-length recoverer that acts as
//! the event buffer, the link configuration, and the session state.
//!
//! ```text
//! Idle ──listen──▶ Listening ──(Pending)──▶ Listening
//!                      │  ▲
//!                      │  └──(Invalid, buffer cleared)
//!                      ├──pause──▶ Paused ──resume──▶ Listening
//!                      └──(Decoded)──▶ Decoded
//! ```
//!
//! `Decoded` is terminal; [`reset()`](ReceiveSession::reset) starts a fresh
//! session from `Idle`. Events may be fed directly with
//! [`push()`](ReceiveSession::push), or drained from a `heapless::spsc`
//! queue filled by the signal input source in its own context with
//! [`drain()`](ReceiveSession::drain).

use heapless::spsc::Consumer;

use crate::config::LinkConfig;
use crate::encoding::Message;
use crate::error::Result;
use crate::recovery::{DetectionEvent, RunLengthRecoverer};
use crate::scanner::{ScanOutcome, scan};

/// State of a [`ReceiveSession`].
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum RxState {
    /// Created or reset; events are ignored.
    #[default]
    Idle,
    /// Accumulating events and scanning for a frame.
    Listening,
    /// Events are ignored, the buffer is kept.
    Paused,
    /// A message was decoded. Terminal.
    Decoded,
}

/// A single receive operation.
#[derive(Debug, Clone)]
pub struct ReceiveSession {
    state: RxState,
    config: LinkConfig,
    recoverer: RunLengthRecoverer,
    message: Option<Message>,
    /// Number of frames rejected by the length or parity checks.
    pub rx_bad: u16,
    /// Number of frames decoded.
    pub rx_good: u16,
}

impl ReceiveSession {
    /// Creates an idle session.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`](crate::error::Error::InvalidConfig) if
    /// `config` does not validate.
    pub fn new(config: LinkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: RxState::Idle,
            recoverer: RunLengthRecoverer::new(config.frequency_hz),
            config,
            message: None,
            rx_bad: 0,
            rx_good: 0,
        })
    }

    /// The current state.
    pub fn state(&self) -> RxState {
        self.state
    }

    /// The link configuration.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Starts accepting events. Only leaves `Idle`.
    pub fn listen(&mut self) {
        if self.state == RxState::Idle {
            debug!("listening");
            self.state = RxState::Listening;
        }
    }

    /// Stops accepting events without discarding the buffer.
    pub fn pause(&mut self) {
        if self.state == RxState::Listening {
            debug!("paused");
            self.state = RxState::Paused;
        }
    }

    /// Resumes accepting events after [`pause()`](Self::pause).
    pub fn resume(&mut self) {
        if self.state == RxState::Paused {
            debug!("resumed");
            self.state = RxState::Listening;
        }
    }

    /// Clears the buffer and any decoded message and returns to `Idle`.
    pub fn reset(&mut self) {
        self.recoverer.reset();
        self.message = None;
        self.state = RxState::Idle;
    }

    /// Whether events have been buffered since the last clear.
    pub fn has_buffered_events(&self) -> bool {
        !self.recoverer.is_empty()
    }

    /// The decoded message, once the session reached `Decoded`.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Takes the decoded message out of the session.
    pub fn take_message(&mut self) -> Option<Message> {
        self.message.take()
    }

    /// Feeds one detection event and scans for a frame.
    ///
    /// Outside `Listening` the event is ignored and the outcome is
    /// [`ScanOutcome::Pending`]. An [`Invalid`](ScanOutcome::Invalid) frame
    /// clears the buffer and keeps listening; a decoded frame clears the
    /// buffer and ends the session.
    pub fn push(&mut self, event: DetectionEvent) -> ScanOutcome {
        if self.state != RxState::Listening {
            return ScanOutcome::Pending;
        }
        self.recoverer.push(event);
        let bits = self.recoverer.bits();
        let outcome = scan(
            &bits,
            self.config.start_marker(),
            self.config.end_marker(),
        );
        match &outcome {
            ScanOutcome::Pending => {}
            ScanOutcome::Invalid => {
                self.rx_bad += 1;
                debug!("invalid frame, clearing {} buffered bits", bits.len());
                self.recoverer.reset();
            }
            ScanOutcome::Decoded(message) => {
                self.rx_good += 1;
                info!("decoded {} characters", message.chars().count());
                self.recoverer.reset();
                self.message = Some(message.clone());
                self.state = RxState::Decoded;
            }
        }
        outcome
    }

    /// Drains queued events until the queue is empty or a message decodes.
    ///
    /// Events left in the queue after a decode are not consumed.
    pub fn drain<const N: usize>(
        &mut self,
        events: &mut Consumer<'_, DetectionEvent, N>,
    ) -> Option<&Message> {
        while self.state == RxState::Listening {
            let Some(event) = events.dequeue() else {
                break;
            };
            let _ = self.push(event);
        }
        self.message.as_ref()
    }
}
