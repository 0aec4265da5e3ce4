//! Error types for the optical link.
//!
//! Every failure is recoverable: the worst outcome of this crate is a
//! message that never decodes. Scan results that merely mean "keep
//! listening" or "discard and keep listening" are
//! [`ScanOutcome`](crate::scanner::ScanOutcome) values, not errors.

use thiserror::Error;

/// Errors surfaced by the link.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Error {
    /// The signal output device rejected a state change.
    #[error("signal output device unavailable")]
    DeviceUnavailable,

    /// A payload bit count that is not a multiple of 8.
    #[error("malformed payload: {0} bits is not a whole number of characters")]
    MalformedPayload(usize),

    /// Nothing left to send after filtering the message.
    #[error("message is empty after filtering")]
    EmptyMessage,

    /// More characters than fit in one frame.
    #[error("message of {0} characters exceeds the frame capacity")]
    MessageTooLong(usize),

    /// A frame is already being transmitted.
    #[error("transmitter busy")]
    Busy,

    /// The link configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// A bit pattern contained characters other than `0` and `1`.
    #[error("bit pattern may only contain 0 and 1")]
    InvalidPattern,

    /// A fixed-capacity buffer would overflow.
    #[error("buffer capacity exceeded")]
    CapacityExceeded,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
