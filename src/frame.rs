//! Frame assembly.
//!
//! A frame wraps an encoded [`Payload`] between the start and end markers
//! and appends a two-bit parity trailer:
//!
//! ```text
//! start marker ++ payload ++ [bit parity, char-count parity] ++ end marker
//! ```
//!
//! The first parity bit is the XOR-fold of the payload bits; the second is
//! the parity of the character count *before* bit expansion. Together they
//! catch single-bit corruption and odd/even length mismatches, nothing more.

use crate::bits::{Bits, ones};
use crate::consts::{MAX_FRAME_BITS, PARITY_BITS};
use crate::encoding::Payload;
use crate::error::{Error, Result};

/// A complete, transmittable frame.
pub type Frame = Bits<MAX_FRAME_BITS>;

/// Computes the parity trailer for `bits` carrying `chars` characters.
pub fn parity(bits: &[bool], chars: usize) -> [bool; PARITY_BITS] {
    [ones(bits) % 2 == 1, chars % 2 == 1]
}

/// Builds a frame around `payload`.
///
/// Pure function of its inputs.
///
/// # Errors
/// [`Error::CapacityExceeded`] if the frame does not fit [`MAX_FRAME_BITS`].
pub fn build(payload: &Payload, start_marker: &[bool], end_marker: &[bool]) -> Result<Frame> {
    let mut frame = Frame::new();
    for part in [
        start_marker,
        payload.bits.as_slice(),
        &parity(&payload.bits, payload.chars),
        end_marker,
    ] {
        frame
            .extend_from_slice(part)
            .map_err(|_| Error::CapacityExceeded)?;
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::pattern;
    use crate::consts::{END_MARKER, START_MARKER};
    use crate::encoding::encode;

    #[test]
    fn test_build_ab_frame() {
        let payload = encode("AB").unwrap();
        let frame = build(&payload, &START_MARKER, &END_MARKER).unwrap();
        let expected = pattern::<43>(concat!(
            "011111111101",
            "0100000101000010",
            "00",
            "0010000000010"
        ));
        assert_eq!(frame.as_slice(), &expected);
    }

    #[test]
    fn test_parity_uses_character_count() {
        // One character, 0x43 has three ones.
        assert_eq!(parity(&pattern::<8>("01000011"), 1), [true, true]);
        // Same bits claimed as two characters flips only the second bit.
        assert_eq!(parity(&pattern::<8>("01000011"), 2), [true, false]);
        assert_eq!(parity(&[], 0), [false, false]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let payload = encode("xyz9").unwrap();
        let a = build(&payload, &START_MARKER, &END_MARKER).unwrap();
        let b = build(&payload, &START_MARKER, &END_MARKER).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), START_MARKER.len() + 32 + PARITY_BITS + END_MARKER.len());
    }

    #[test]
    fn test_build_rejects_oversized_markers() {
        let payload = encode("AB").unwrap();
        let huge = [true; MAX_FRAME_BITS];
        assert_eq!(
            build(&payload, &huge, &END_MARKER),
            Err(Error::CapacityExceeded)
        );
    }
}
