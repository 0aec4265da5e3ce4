//! Run-length clock recovery for on/off detection events.
//!
//! The transmitter and the receiver share no clock; the only common
//! reference is the nominal bit period. This module groups detection events
//! into runs of equal state and turns each run into
//! `round(duration / bit_period)` bits, at least one.
//!
//! Only state changes carry reliable timestamps, so a run is measured from
//! the event where its state was first seen to the event where the next
//! state was first seen. The first run is measured from the first event
//! observed, which undercounts it when observation starts mid-run. The run
//! still in progress is measured up to the latest event so that a frame
//! ending in the idle state becomes visible without waiting for another
//! edge.
//!
//! Rounding tolerates up to ±0.5 bit periods of error per run. Error is not
//! corrected inside long runs.

use libm::roundf;

use crate::bits::{Bits, push_run};
use crate::consts::MAX_RECOVERED_BITS;
use crate::timer::bit_period_ms;

/// Recovered bits, oldest first.
pub type RecoveredBits = Bits<MAX_RECOVERED_BITS>;

/// One sample from the signal input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct DetectionEvent {
    /// Monotonic time of the sample in milliseconds.
    pub timestamp_ms: u64,
    /// Whether the signal was present.
    pub on: bool,
}

impl DetectionEvent {
    /// Creates a new event.
    pub fn new(timestamp_ms: u64, on: bool) -> Self {
        Self { timestamp_ms, on }
    }
}

/// The run currently being observed.
#[derive(Debug, Clone, Copy)]
struct Run {
    on: bool,
    start_ms: u64,
    last_ms: u64,
}

/// Number of bits a run of `duration_ms` stands for.
pub fn bit_count(duration_ms: u64, bit_period_ms: f32) -> usize {
    let count = roundf(duration_ms as f32 / bit_period_ms);
    if count.is_finite() && count >= 1.0 {
        count as usize
    } else {
        1
    }
}

/// Incremental run-length recoverer.
///
/// Holds the bits of every completed run plus the run in progress. Feeding
/// it a buffer of events one by one gives the same result as [`recover`].
#[derive(Debug, Clone)]
pub struct RunLengthRecoverer {
    bit_period_ms: f32,
    committed: RecoveredBits,
    run: Option<Run>,
}

impl RunLengthRecoverer {
    /// Creates an empty recoverer for the given toggle rate.
    pub fn new(frequency_hz: u32) -> Self {
        Self {
            bit_period_ms: bit_period_ms(frequency_hz),
            committed: RecoveredBits::new(),
            run: None,
        }
    }

    /// Adds one detection event.
    pub fn push(&mut self, event: DetectionEvent) {
        match self.run.as_mut() {
            None => {
                self.run = Some(Run {
                    on: event.on,
                    start_ms: event.timestamp_ms,
                    last_ms: event.timestamp_ms,
                });
            }
            Some(run) if run.on == event.on => {
                run.last_ms = run.last_ms.max(event.timestamp_ms);
            }
            Some(run) => {
                let duration = event.timestamp_ms.saturating_sub(run.start_ms);
                let count = bit_count(duration, self.bit_period_ms);
                trace!("run of {} bits, on: {}", count, run.on);
                push_run(&mut self.committed, run.on, count);
                *run = Run {
                    on: event.on,
                    start_ms: event.timestamp_ms,
                    last_ms: event.timestamp_ms,
                };
            }
        }
    }

    /// Bits recovered so far, including the run in progress.
    pub fn bits(&self) -> RecoveredBits {
        let mut bits = self.committed.clone();
        if let Some(run) = self.run {
            let duration = run.last_ms.saturating_sub(run.start_ms);
            push_run(&mut bits, run.on, bit_count(duration, self.bit_period_ms));
        }
        bits
    }

    /// Whether no event has been seen since creation or the last reset.
    pub fn is_empty(&self) -> bool {
        self.run.is_none()
    }

    /// Discards every event seen so far.
    pub fn reset(&mut self) {
        self.committed.clear();
        self.run = None;
    }
}

/// Recovers the bit string carried by a buffer of detection events.
pub fn recover<I>(events: I, frequency_hz: u32) -> RecoveredBits
where
    I: IntoIterator<Item = DetectionEvent>,
{
    let mut recoverer = RunLengthRecoverer::new(frequency_hz);
    for event in events {
        recoverer.push(event);
    }
    recoverer.bits()
}
