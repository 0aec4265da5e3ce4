//! # lightcom
//!
//! A portable, no_std Rust implementation of a one-way optical data link: a
//! transmitter flashes a light (or a screen colour) on and off at a fixed bit
//! rate, and a receiver watching that light recovers the text.
//!
//! The link carries short alphanumeric messages (`[A-Za-z0-9]`) using:
//! - `embedded-hal` traits for the output device, the input pin and timing
//! - a framed bitstream: start marker, 8-bit ASCII payload, two parity bits,
//!   end marker
//! - run-length bit recovery from timestamped presence samples
//! - a last-occurrence frame scanner tolerant of mid-stream starts
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` |
//! | `delay-loop`          | Uses `embedded_hal::delay::DelayNs` for bit timing |
//! | `timer-isr` (default) | Uses `critical_section::with` to share the transmitter with a timer ISR |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Protocol
//!
//! ```text
//! 011111111101 | b7..b0 per character | [ones odd, chars odd] | 0010000000010
//!    start     |        payload        |        parity         |      end
//! ```
//!
//! Each frame is sent `cycles` times back to back (2 by default) at
//! `frequency_hz` bits per second (10 by default), so a receiver that starts
//! watching mid-frame still sees one complete copy.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lightcom::config::LinkConfig;
//! use lightcom::transmitter::Transmitter;
//!
//! let mut transmitter = Transmitter::new(led, LinkConfig::default(), 1)?;
//! transmitter.send("HELLO")?;
//! loop {
//!     transmitter.step()?; // Call once per bit period (100 ms at 10 Hz)
//! }
//! ```
//!
//! On the other end, feed samples of the light to a receive session:
//!
//! ```rust,ignore
//! use lightcom::receiver::ReceiveSession;
//! use lightcom::sampler::PinSampler;
//! use lightcom::scanner::ScanOutcome;
//!
//! let mut sampler = PinSampler::new(photodiode, 25_000, false);
//! let mut session = ReceiveSession::new(LinkConfig::default())?;
//! session.listen();
//! loop {
//!     if let ScanOutcome::Decoded(text) = session.push(sampler.sample()) {
//!         // ...
//!     }
//!     delay.delay_us(25_000);
//! }
//! ```
//!
//! ## Integration Notes
//!
//! - Sample the input several times per bit period; the receiver measures
//!   run lengths, not individual samples.
//! - Both ends must agree on frequency and markers.
//! - Only one transmitter instance should be active at a time in
//!   interrupt-driven mode.
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

pub use heapless;

#[macro_use]
mod fmt;

pub mod bits;
pub mod config;
pub mod consts;
pub mod encoding;
pub mod error;
pub mod frame;
pub mod receiver;
pub mod recovery;
pub mod sampler;
pub mod scanner;
pub mod timer;
pub mod transmitter;
