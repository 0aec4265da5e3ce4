//! Link configuration shared by both ends of the link.
//!
//! The toggle rate and the markers must match on the transmitter and the
//! receiver; the cycle count only matters to the transmitter.

use crate::bits::{self, Bits};
use crate::consts::{
    DEFAULT_CYCLES, DEFAULT_FREQUENCY_HZ, END_MARKER, MAX_MARKER_BITS, MIN_MARKER_BITS,
    START_MARKER,
};
use crate::error::{Error, Result};

/// A frame marker.
pub type Marker = Bits<MAX_MARKER_BITS>;

/// Timing and framing parameters of a link.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct LinkConfig {
    /// Signal toggling rate in Hz; one bit is sent per period.
    pub frequency_hz: u32,
    /// Number of times a frame is sent back to back.
    pub cycles: u32,
    start_marker: Marker,
    end_marker: Marker,
}

impl Default for LinkConfig {
    fn default() -> Self {
        let mut start_marker = Marker::new();
        let mut end_marker = Marker::new();
        // Both protocol markers are shorter than MAX_MARKER_BITS.
        let _ = start_marker.extend_from_slice(&START_MARKER);
        let _ = end_marker.extend_from_slice(&END_MARKER);
        Self {
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            cycles: DEFAULT_CYCLES,
            start_marker,
            end_marker,
        }
    }
}

impl LinkConfig {
    /// Default configuration at the given toggle rate.
    pub fn new(frequency_hz: u32) -> Self {
        Self {
            frequency_hz,
            ..Self::default()
        }
    }

    /// Sets the number of times a frame is sent.
    pub fn with_cycles(mut self, cycles: u32) -> Self {
        self.cycles = cycles;
        self
    }

    /// Replaces both markers.
    ///
    /// # Errors
    /// [`Error::CapacityExceeded`] if a marker is longer than
    /// [`MAX_MARKER_BITS`], or any error from [`validate`](Self::validate).
    pub fn with_markers(mut self, start: &[bool], end: &[bool]) -> Result<Self> {
        self.start_marker = Marker::from_slice(start).map_err(|_| Error::CapacityExceeded)?;
        self.end_marker = Marker::from_slice(end).map_err(|_| Error::CapacityExceeded)?;
        self.validate()?;
        Ok(self)
    }

    /// Replaces both markers from `0`/`1` strings.
    ///
    /// # Errors
    /// [`Error::InvalidPattern`] for characters other than `0` and `1`,
    /// otherwise as [`with_markers`](Self::with_markers).
    pub fn with_marker_patterns(self, start: &str, end: &str) -> Result<Self> {
        let start: Marker = bits::parse(start)?;
        let end: Marker = bits::parse(end)?;
        self.with_markers(&start, &end)
    }

    /// The start marker.
    pub fn start_marker(&self) -> &[bool] {
        &self.start_marker
    }

    /// The end marker.
    pub fn end_marker(&self) -> &[bool] {
        &self.end_marker
    }

    /// Duration of one bit in milliseconds: `1000 / frequency_hz`.
    pub fn bit_period_ms(&self) -> f32 {
        crate::timer::bit_period_ms(self.frequency_hz)
    }

    /// Checks that both ends can agree on this configuration.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] if the frequency or cycle count is zero, a
    /// marker is shorter than [`MIN_MARKER_BITS`], the markers are equal, or
    /// one is a prefix of the other.
    pub fn validate(&self) -> Result<()> {
        if self.frequency_hz == 0 {
            return Err(Error::InvalidConfig("frequency must be non-zero"));
        }
        if self.cycles == 0 {
            return Err(Error::InvalidConfig("at least one cycle is required"));
        }
        if self.start_marker.len() < MIN_MARKER_BITS || self.end_marker.len() < MIN_MARKER_BITS {
            return Err(Error::InvalidConfig("markers must be at least 8 bits"));
        }
        if self.start_marker.starts_with(&self.end_marker)
            || self.end_marker.starts_with(&self.start_marker)
        {
            return Err(Error::InvalidConfig("markers must differ and not prefix each other"));
        }
        Ok(())
    }
}
