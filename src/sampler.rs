//! Pin-based signal input source.
//!
//! [`PinSampler`] reads a digital input (a photodiode comparator, a
//! light-dependent resistor behind a Schmitt trigger, a camera pipeline
//! exposing a "colour present" line) once per tick and stamps each sample
//! with the elapsed tick time. It does no detection of its own; whatever
//! decides "present" lives in front of the pin.
//!
//! Samples can be handed to a [`ReceiveSession`](crate::receiver::ReceiveSession)
//! directly, or pushed into a `heapless::spsc` queue from an interrupt and
//! drained by the session in the main loop.

use embedded_hal::digital::InputPin;
use heapless::spsc::Producer;

use crate::recovery::DetectionEvent;

/// Samples an input pin into [`DetectionEvent`]s.
#[derive(Debug)]
pub struct PinSampler<RX>
where
    RX: InputPin,
{
    /// Input pin
    pub rx: RX,
    inverted: bool,
    tick_us: u32,
    ticks: u64,
}

impl<RX> PinSampler<RX>
where
    RX: InputPin,
{
    /// Creates a sampler called every `tick_us` microseconds.
    ///
    /// With `inverted`, a low pin reads as "signal present".
    pub fn new(rx: RX, tick_us: u32, inverted: bool) -> Self {
        Self {
            rx,
            inverted,
            tick_us,
            ticks: 0,
        }
    }

    /// Milliseconds elapsed since the first sample.
    pub fn elapsed_ms(&self) -> u64 {
        self.ticks * u64::from(self.tick_us) / 1000
    }

    /// Reads the pin once and advances the clock by one tick.
    ///
    /// A read error counts as "signal absent".
    pub fn sample(&mut self) -> DetectionEvent {
        let high = self.rx.is_high().unwrap_or(false);
        let event = DetectionEvent::new(self.elapsed_ms(), high != self.inverted);
        self.ticks += 1;
        event
    }

    /// Samples the pin and enqueues the event.
    ///
    /// Returns `false` if the queue was full and the event was dropped.
    pub fn sample_into<const N: usize>(
        &mut self,
        queue: &mut Producer<'_, DetectionEvent, N>,
    ) -> bool {
        let event = self.sample();
        queue.enqueue(event).is_ok()
    }
}
