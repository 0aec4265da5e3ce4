//! Fixed-capacity bit buffers and bit-pattern helpers.
//!
//! Bits are stored one per `bool`, `true` meaning "on" (a `1`). Patterns are
//! written as strings of `0` and `1`, most significant bit first.

use heapless::Vec;

use crate::error::{Error, Result};

/// An ordered, fixed-capacity sequence of bits.
pub type Bits<const N: usize> = Vec<bool, N>;

/// Parses a `0`/`1` pattern at compile time.
///
/// Panics during constant evaluation if the pattern length differs from `N`
/// or contains any other character.
///
/// ```rust
/// use lightcom::bits::pattern;
///
/// const MARK: [bool; 4] = pattern("0110");
/// assert_eq!(MARK, [false, true, true, false]);
/// ```
pub const fn pattern<const N: usize>(s: &str) -> [bool; N] {
    let bytes = s.as_bytes();
    assert!(bytes.len() == N, "bit pattern length mismatch");
    let mut out = [false; N];
    let mut i = 0;
    while i < N {
        out[i] = match bytes[i] {
            b'0' => false,
            b'1' => true,
            _ => panic!("bit pattern may only contain 0 and 1"),
        };
        i += 1;
    }
    out
}

/// Parses a `0`/`1` pattern at runtime.
///
/// # Errors
/// - [`Error::InvalidPattern`] if `s` contains anything but `0` and `1`
/// - [`Error::CapacityExceeded`] if `s` is longer than `N`
pub fn parse<const N: usize>(s: &str) -> Result<Bits<N>> {
    let mut out = Bits::new();
    for c in s.chars() {
        let bit = match c {
            '0' => false,
            '1' => true,
            _ => return Err(Error::InvalidPattern),
        };
        out.push(bit).map_err(|_| Error::CapacityExceeded)?;
    }
    Ok(out)
}

/// Number of `1` bits in `bits`.
pub fn ones(bits: &[bool]) -> usize {
    bits.iter().filter(|&&b| b).count()
}

/// Index of the last occurrence of `needle` in `haystack`.
///
/// An empty needle never matches.
pub fn rfind(haystack: &[bool], needle: &[bool]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

/// Appends `count` copies of `bit`, dropping the oldest bits when full.
///
/// `count` is clamped to the capacity, since anything beyond it would only
/// push out copies of the same bit.
pub fn push_run<const N: usize>(buf: &mut Bits<N>, bit: bool, count: usize) {
    let count = count.min(N);
    let overflow = (buf.len() + count).saturating_sub(N);
    if overflow > 0 {
        let keep = buf.len() - overflow;
        buf.rotate_left(overflow);
        buf.truncate(keep);
    }
    for _ in 0..count {
        let _ = buf.push(bit);
    }
}
