//! Constants used across the optical link protocol.
//!
//! This module defines the protocol-version constants (frame markers,
//! default timing) and the capacities of the fixed-size buffers used by the
//! transmitter and receiver.
//!
//! ## Key Concepts
//!
//! - **Markers**: bit patterns delimiting a frame. They are constants of the
//!   protocol version and never derived from the payload.
//! - **Timing**: the default toggle rate and repeat count used when a
//!   [`LinkConfig`](crate::config::LinkConfig) is not customised.
//! - **Buffer Sizing**: derived from the longest message a frame may carry.
//!
//! The wire format of one frame is:
//!
//! ```text
//! +--------------+------------------------+----------+------------+
//! | start marker | payload (8 bits/char)  | parity 2 | end marker |
//! +--------------+------------------------+----------+------------+
//! ```

use crate::bits::pattern;

/// Length of the start marker in bits.
pub const START_MARKER_LEN: usize = 12;

/// Length of the end marker in bits.
pub const END_MARKER_LEN: usize = 13;

/// The START marker prepended to every frame: `011111111101`.
pub const START_MARKER: [bool; START_MARKER_LEN] = pattern("011111111101");

/// The END marker appended to every frame: `0010000000010`.
pub const END_MARKER: [bool; END_MARKER_LEN] = pattern("0010000000010");

/// Shortest marker accepted by [`LinkConfig`](crate::config::LinkConfig).
pub const MIN_MARKER_BITS: usize = 8;

/// Longest marker accepted by [`LinkConfig`](crate::config::LinkConfig).
pub const MAX_MARKER_BITS: usize = 32;

/// Number of bits in the parity trailer.
pub const PARITY_BITS: usize = 2;

/// Bits used to encode a single character.
pub const BITS_PER_CHAR: usize = 8;

/// Default signal toggling rate in Hz.
pub const DEFAULT_FREQUENCY_HZ: u32 = 10;

/// Default number of times a frame is sent.
pub const DEFAULT_CYCLES: u32 = 2;

/// Maximum number of characters carried by one frame.
pub const MAX_MESSAGE_LEN: usize = 60;

/// Maximum size in bytes of a decoded message.
///
/// Decoding maps every byte to a `char`; bytes above `0x7f` take two bytes
/// in UTF-8.
pub const MAX_MESSAGE_BYTES: usize = MAX_MESSAGE_LEN * 2;

/// Maximum number of payload bits in one frame.
pub const MAX_PAYLOAD_BITS: usize = MAX_MESSAGE_LEN * BITS_PER_CHAR;

/// Maximum size of a complete frame, markers and parity included.
pub const MAX_FRAME_BITS: usize = MAX_PAYLOAD_BITS + PARITY_BITS + 2 * MAX_MARKER_BITS;

/// Size of the receiver's sliding window of recovered bits.
///
/// Must hold at least one complete frame; older bits are dropped first.
pub const MAX_RECOVERED_BITS: usize = 1024;
