//! Frame extraction from a recovered bit string.
//!
//! The scanner looks for the **last** start marker: when the sender repeats
//! a frame and the receiver joined mid-stream, the most recent start marker
//! is the one most likely followed by a complete frame. Within what follows
//! it, the last end marker closes the frame; the two bits before the end
//! marker are the parity trailer and everything between is the payload.
//!
//! Marker search is a heuristic. A payload that happens to contain a marker
//! pattern can be mis-framed; the length and parity checks reject most such
//! frames, not all of them.

use crate::bits::rfind;
use crate::consts::{BITS_PER_CHAR, PARITY_BITS};
use crate::encoding::{Message, decode};
use crate::frame::parity;

/// Result of scanning a recovered bit string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum ScanOutcome {
    /// No complete frame yet; keep accumulating.
    Pending,
    /// A complete frame whose payload passed every check.
    Decoded(Message),
    /// Markers were found but the frame failed its length or parity checks.
    /// Discard the buffered events and keep listening.
    Invalid,
}

/// Searches `bits` for a complete frame delimited by the given markers.
pub fn scan(bits: &[bool], start_marker: &[bool], end_marker: &[bool]) -> ScanOutcome {
    let Some(start) = rfind(bits, start_marker) else {
        return ScanOutcome::Pending;
    };
    let body = &bits[start + start_marker.len()..];
    let Some(end) = rfind(body, end_marker) else {
        return ScanOutcome::Pending;
    };
    let Some(payload_len) = end.checked_sub(PARITY_BITS) else {
        debug!("frame too short for a parity trailer: {} bits", end);
        return ScanOutcome::Invalid;
    };
    let (payload, trailer) = body[..end].split_at(payload_len);

    if payload_len % BITS_PER_CHAR != 0 || payload_len < BITS_PER_CHAR {
        debug!("rejecting payload of {} bits", payload_len);
        return ScanOutcome::Invalid;
    }
    if trailer != parity(payload, payload_len / BITS_PER_CHAR).as_slice() {
        debug!("parity mismatch over {} payload bits", payload_len);
        return ScanOutcome::Invalid;
    }
    match decode(payload) {
        Ok(message) => ScanOutcome::Decoded(message),
        Err(_) => ScanOutcome::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::pattern;
    use crate::consts::{END_MARKER, START_MARKER};
    use crate::encoding::{Payload, encode};
    use crate::frame::{Frame, build};

    fn ab_frame() -> Frame {
        build(&encode("AB").unwrap(), &START_MARKER, &END_MARKER).unwrap()
    }

    fn scan_default(bits: &[bool]) -> ScanOutcome {
        scan(bits, &START_MARKER, &END_MARKER)
    }

    #[test]
    fn test_scan_decodes_complete_frame() {
        assert_eq!(
            scan_default(&ab_frame()),
            ScanOutcome::Decoded(Message::try_from("AB").unwrap())
        );
    }

    #[test]
    fn test_scan_pending_without_markers() {
        let frame = ab_frame();
        assert_eq!(scan_default(&[]), ScanOutcome::Pending);
        assert_eq!(scan_default(&frame[3..]), ScanOutcome::Pending);
        // Cut before the end marker.
        let cut = frame.len() - END_MARKER.len();
        assert_eq!(scan_default(&frame[..cut]), ScanOutcome::Pending);
        // Cut inside the end marker.
        assert_eq!(scan_default(&frame[..frame.len() - 1]), ScanOutcome::Pending);
    }

    #[test]
    fn test_scan_rejects_flipped_first_payload_bit() {
        let mut frame = ab_frame();
        frame[START_MARKER.len()] = true;
        assert_eq!(scan_default(&frame), ScanOutcome::Invalid);
    }

    #[test]
    fn test_scan_rejects_any_single_bit_flip() {
        let clean = ab_frame();
        let payload_and_parity = START_MARKER.len()..clean.len() - END_MARKER.len();
        for i in payload_and_parity {
            let mut frame = clean.clone();
            frame[i] = !frame[i];
            assert_eq!(scan_default(&frame), ScanOutcome::Invalid, "bit {i}");
        }
    }

    #[test]
    fn test_scan_rejects_empty_and_ragged_payloads() {
        let empty = build(&Payload::default(), &START_MARKER, &END_MARKER).unwrap();
        assert_eq!(scan_default(&empty), ScanOutcome::Invalid);

        let mut ragged = Vec::new();
        ragged.extend_from_slice(&START_MARKER);
        ragged.extend_from_slice(&pattern::<7>("0100000"));
        ragged.extend_from_slice(&parity(&pattern::<7>("0100000"), 1));
        ragged.extend_from_slice(&END_MARKER);
        assert_eq!(scan_default(&ragged), ScanOutcome::Invalid);

        let mut no_trailer = Vec::new();
        no_trailer.extend_from_slice(&START_MARKER);
        no_trailer.extend_from_slice(&[false]);
        no_trailer.extend_from_slice(&END_MARKER);
        assert_eq!(scan_default(&no_trailer), ScanOutcome::Invalid);
    }

    #[test]
    fn test_scan_isolates_uniform_payloads() {
        for bit in [true, false] {
            let mut payload = Payload::default();
            payload.bits.extend_from_slice(&[bit; 32]).unwrap();
            payload.chars = 4;
            let frame = build(&payload, &START_MARKER, &END_MARKER).unwrap();

            // Surround the frame with noise that contains no start marker.
            let mut stream = Vec::new();
            stream.extend_from_slice(&pattern::<9>("110100110"));
            stream.extend_from_slice(&frame);
            stream.extend_from_slice(&[false; 20]);

            let expected: String =
                core::iter::repeat(char::from(if bit { 0xff } else { 0x00 })).take(4).collect();
            match scan_default(&stream) {
                ScanOutcome::Decoded(message) => assert_eq!(message.as_str(), expected),
                other => panic!("uniform payload of {bit} not isolated: {other:?}"),
            }
        }
    }

    #[test]
    fn test_scan_prefers_last_repetition() {
        let mut stream = Vec::new();
        let first = build(&encode("old").unwrap(), &START_MARKER, &END_MARKER).unwrap();
        let second = build(&encode("new").unwrap(), &START_MARKER, &END_MARKER).unwrap();
        stream.extend_from_slice(&first);
        stream.extend_from_slice(&second);
        assert_eq!(
            scan_default(&stream),
            ScanOutcome::Decoded(Message::try_from("new").unwrap())
        );
    }

    #[test]
    fn test_scan_with_custom_markers() {
        let start = pattern::<8>("11111110");
        let end = pattern::<8>("01111111");
        let frame = build(&encode("Z").unwrap(), &start, &end).unwrap();
        assert_eq!(
            scan(&frame, &start, &end),
            ScanOutcome::Decoded(Message::try_from("Z").unwrap())
        );
    }
}
