//! Timer and tick-loop utilities for the transmitter.
//!
//! Logic for scheduling bit-steps. This employs two approaches: an interrupt
//! service routine sharing the transmitter through `critical_section::with`
//! (`timer-isr` feature), or a blocking delay loop (`delay-loop` feature).
//!
//! Contains helpers for polling- and ISR-based scheduling, including:
//! - `bit_period_ms` / `bit_period_us`: duration of one bit
//! - `ticks_per_bit`: divider for a timer faster than the bit rate
//! - `compute_ocr_value`: compare-match value for an AVR-style CTC timer
//! - `run_transmit_loop`: blocking loop for `DelayNs` (feature `delay-loop`)
//! - `global_transmitter_tick` and `tick_transmitter!()`: interrupt-based
//!   tick wrappers (feature `timer-isr`)
//!
//! Common prescalers: (For use with `compute_ocr_value`)
//!
//! | PRESCALER | TIMER_COUNTS | Overflow Interval |
//! |-----------|--------------|-------------------|
//! |        64 |          250 |              1 ms |
//! |       256 |          125 |              2 ms |
//! |       256 |          250 |              4 ms |
//! |      1024 |          125 |              8 ms |
//! |      1024 |          250 |             16 ms |

use libm::roundf;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;

/// Microseconds in one millisecond.
pub const MICROSECONDS_PER_MILLISECOND: u32 = 1_000;

/// Duration of one bit in milliseconds: `1000 / frequency_hz`.
pub fn bit_period_ms(frequency_hz: u32) -> f32 {
    1000.0 / frequency_hz as f32
}

/// Duration of one bit in whole microseconds.
pub fn bit_period_us(frequency_hz: u32) -> u32 {
    roundf(bit_period_ms(frequency_hz) * MICROSECONDS_PER_MILLISECOND as f32) as u32
}

/// Number of timer ticks per bit period, at least 1.
///
/// # Arguments
/// - `frequency_hz`: bit rate of the link
/// - `tick_us`: interval between timer ticks in microseconds
pub fn ticks_per_bit(frequency_hz: u32, tick_us: u32) -> u16 {
    let ticks = roundf(bit_period_us(frequency_hz) as f32 / tick_us as f32);
    if ticks >= 1.0 { ticks as u16 } else { 1 }
}

/// Computes the OCR value for an AVR timer (CTC mode)
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 64, 256, 1024)
/// - `tick_us`: desired tick interval in microseconds
///
/// # Returns
/// Compare value for OCRnA, rounded to the nearest integer. The counter
/// counts from 0 to OCR inclusive, hence the `- 1`.
pub fn compute_ocr_value(f_cpu: u32, prescaler: u32, tick_us: u32) -> u16 {
    let counts_per_second = f_cpu as f32 / prescaler as f32;
    let counts = roundf(counts_per_second * tick_us as f32 / 1_000_000.0);
    if counts >= 1.0 { counts as u16 - 1 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_period() {
        assert_eq!(bit_period_ms(10), 100.0);
        assert_eq!(bit_period_us(3), 333_333);
        assert_eq!(bit_period_us(30), 33_333);
    }

    #[test]
    fn test_ticks_per_bit() {
        assert_eq!(ticks_per_bit(10, 1_000), 100);
        assert_eq!(ticks_per_bit(3, 4_000), 83);
        // A timer slower than the bit rate still steps every tick.
        assert_eq!(ticks_per_bit(10, 500_000), 1);
    }

    #[test]
    fn test_compute_ocr_value() {
        // 16 MHz / 64 = 250 kHz: 250 counts per millisecond.
        assert_eq!(compute_ocr_value(16_000_000, 64, 1_000), 249);
        assert_eq!(compute_ocr_value(16_000_000, 1024, 16_000), 249);
        assert_eq!(compute_ocr_value(16_000_000, 1024, 10), 0);
    }
}
