//! 8-bit character encoding and decoding for optical message framing.
//!
//! This module converts between text and the bit sequence carried in the
//! payload of a frame. Each accepted character is sent as its 8-bit ASCII
//! code, most significant bit first.
//!
//! ## Accepted Characters
//!
//! Only `[A-Za-z0-9]` is transmitted. Anything else is silently dropped
//! before encoding: never padded, never an error.
//!
//! ## Functions
//!
//! - [`filter`]: drops characters the link does not carry
//! - [`encode_byte`] / [`decode_byte`]: a single character
//! - [`encode`]: text to a [`Payload`]
//! - [`decode`]: payload bits back to text
//!
//! ## Limitations
//!
//! - There is no escaping; decoding maps every byte 0–255 to the `char` of
//!   the same value even though [`encode`] only produces alphanumerics.

use heapless::String;

use crate::bits::Bits;
use crate::consts::{BITS_PER_CHAR, MAX_MESSAGE_BYTES, MAX_MESSAGE_LEN, MAX_PAYLOAD_BITS};
use crate::error::{Error, Result};

/// A decoded message.
pub type Message = String<MAX_MESSAGE_BYTES>;

/// Encoded payload of a single frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct Payload {
    /// Payload bits, 8 per character, MSB first.
    pub bits: Bits<MAX_PAYLOAD_BITS>,
    /// Number of characters before bit expansion.
    pub chars: usize,
}

impl Payload {
    /// Whether the payload carries nothing.
    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }
}

/// Whether `c` can be carried by the link.
pub fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Drops every character the link does not carry.
pub fn filter(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter(|&c| is_allowed(c))
}

/// Encodes one byte into 8 bits, MSB first.
pub fn encode_byte(byte: u8) -> [bool; BITS_PER_CHAR] {
    let mut out = [false; BITS_PER_CHAR];
    for (i, bit) in out.iter_mut().enumerate() {
        *bit = byte & (0x80 >> i) != 0;
    }
    out
}

/// Reassembles a byte from up to 8 bits, MSB first.
pub fn decode_byte(bits: &[bool]) -> u8 {
    bits.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b))
}

/// Encodes the accepted characters of `text` into a payload.
///
/// An input with no accepted characters gives an empty payload; callers
/// treat that as "nothing to send".
///
/// # Errors
/// [`Error::MessageTooLong`] if more than
/// [`MAX_MESSAGE_LEN`](crate::consts::MAX_MESSAGE_LEN) characters remain
/// after filtering.
pub fn encode(text: &str) -> Result<Payload> {
    let mut payload = Payload::default();
    for c in filter(text) {
        payload.chars += 1;
        if payload.chars > MAX_MESSAGE_LEN {
            return Err(Error::MessageTooLong(filter(text).count()));
        }
        // Accepted characters are ASCII, so the cast is lossless.
        payload
            .bits
            .extend_from_slice(&encode_byte(c as u8))
            .map_err(|_| Error::CapacityExceeded)?;
    }
    Ok(payload)
}

/// Decodes payload bits back into text.
///
/// # Errors
/// - [`Error::MalformedPayload`] if `bits.len()` is not a multiple of 8
/// - [`Error::CapacityExceeded`] if the text does not fit a [`Message`]
pub fn decode(bits: &[bool]) -> Result<Message> {
    if bits.len() % BITS_PER_CHAR != 0 {
        return Err(Error::MalformedPayload(bits.len()));
    }
    let mut message = Message::new();
    for chunk in bits.chunks(BITS_PER_CHAR) {
        message
            .push(char::from(decode_byte(chunk)))
            .map_err(|_| Error::CapacityExceeded)?;
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::pattern;

    #[test]
    fn test_encode_maps_ascii_msb_first() {
        let payload = encode("AB").unwrap();
        assert_eq!(payload.chars, 2);
        assert_eq!(
            payload.bits.as_slice(),
            &pattern::<16>("0100000101000010")
        );
    }

    #[test]
    fn test_encode_drops_disallowed_characters() {
        let payload = encode("A-B !").unwrap();
        assert_eq!(payload, encode("AB").unwrap());
    }

    #[test]
    fn test_encode_filtering_is_idempotent() {
        let input = "Hello, World! 42 ü_x";
        let filtered: std::string::String = filter(input).collect();
        assert_eq!(filtered, "HelloWorld42x");
        assert_eq!(encode(&filtered).unwrap(), encode(input).unwrap());
    }

    #[test]
    fn test_encode_empty_after_filtering() {
        let payload = encode("?!. ").unwrap();
        assert!(payload.is_empty());
        assert!(payload.bits.is_empty());
    }

    #[test]
    fn test_encode_rejects_long_messages() {
        let long: std::string::String = core::iter::repeat('a').take(MAX_MESSAGE_LEN + 5).collect();
        assert_eq!(encode(&long), Err(Error::MessageTooLong(MAX_MESSAGE_LEN + 5)));

        let max: std::string::String = core::iter::repeat('z').take(MAX_MESSAGE_LEN).collect();
        assert_eq!(encode(&max).unwrap().chars, MAX_MESSAGE_LEN);
    }

    #[test]
    fn test_decode_round_trips_alphanumerics() {
        let text = "Rust2024abcXYZ";
        let payload = encode(text).unwrap();
        assert_eq!(decode(&payload.bits).unwrap().as_str(), text);
    }

    #[test]
    fn test_decode_rejects_partial_characters() {
        assert_eq!(
            decode(&pattern::<7>("0100000")),
            Err(Error::MalformedPayload(7))
        );
    }

    #[test]
    fn test_decode_accepts_any_byte() {
        let mut bits = Vec::new();
        bits.extend_from_slice(&encode_byte(0x00));
        bits.extend_from_slice(&encode_byte(0xff));
        let text = decode(&bits).unwrap();
        let chars: Vec<char> = text.chars().collect();
        assert_eq!(chars, [char::from(0x00), char::from(0xff)]);
    }
}
