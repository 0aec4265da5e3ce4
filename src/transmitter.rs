//! On/off transmitter for the optical link.
//!
//! This module provides the [`Transmitter`] struct, which drives a signal
//! output device (any `embedded-hal` [`OutputPin`]: an LED, a relay, a pin
//! that toggles a display) through a frame one bit per period.
//!
//! The transmitter is a state machine holding `(frame, index, cycle)`. It
//! never sleeps: an external scheduler advances it, either once per bit
//! with [`step()`](Transmitter::step) or from a faster timer with
//! [`tick()`](Transmitter::tick).
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use lightcom::config::LinkConfig;
//! use lightcom::transmitter::Transmitter;
//!
//! # let mut expectations = vec![PinTransaction::set(PinState::Low); 2];
//! # for &bit in lightcom::frame::build(
//! #     &lightcom::encoding::encode("Hi").unwrap(),
//! #     &lightcom::consts::START_MARKER,
//! #     &lightcom::consts::END_MARKER,
//! # ).unwrap().iter() {
//! #     expectations.push(PinTransaction::set(if bit { PinState::High } else { PinState::Low }));
//! # }
//! # expectations.push(PinTransaction::set(PinState::Low));
//! # let led = Pin::new(&expectations);
//! let config = LinkConfig::new(10).with_cycles(1);
//! let mut transmitter = Transmitter::new(led, config, 1).unwrap();
//!
//! transmitter.send("Hi").unwrap();
//! while transmitter.is_busy() {
//!     transmitter.step().unwrap(); // Called every 100 ms by a timer
//! }
//! # transmitter.tx.done();
//! ```
//!
//! Repeating the frame (`cycles > 1`) exists because the receiver shares no
//! clock with the transmitter and may start observing mid-frame.

use core::convert::Infallible;

use embedded_hal::digital::{OutputPin, PinState};

use crate::config::LinkConfig;
use crate::encoding::encode;
use crate::error::{Error, Result};
use crate::frame::{Frame, build};

/// Operating mode of a [`Transmitter`].
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum TxMode {
    /// Nothing to send; the output is held off.
    #[default]
    Idle,
    /// A frame is being sent.
    Tx,
}

/// A frame transmitter driving an on/off output.
///
/// `1` bits set the output high, `0` bits set it low. Once every cycle of a
/// frame has been sent the output is forced low and the transmitter returns
/// to [`TxMode::Idle`].
///
/// ## Type Parameters
///
/// - `TX`: the signal output device, any [`OutputPin`]. A pin error is
///   reported as [`Error::DeviceUnavailable`].
#[derive(Debug)]
pub struct Transmitter<TX>
where
    TX: OutputPin,
{
    /// The current mode
    pub mode: TxMode,
    /// Output pin
    pub tx: TX,
    config: LinkConfig,
    ticks_per_bit: u16,
    tick_counter: u16,
    frame: Frame,
    /// Index of the next bit to send within the frame.
    pub(crate) index: usize,
    /// Number of completed passes over the frame.
    pub(crate) cycle: u32,
    /// Number of frames sent in full.
    pub tx_good: u16,
}

impl<TX> Transmitter<TX>
where
    TX: OutputPin,
{
    /// Creates a new transmitter and drives the output off.
    ///
    /// # Arguments
    /// - `tx`: the signal output device
    /// - `config`: link configuration
    /// - `ticks_per_bit`: number of [`tick()`](Self::tick) calls per bit
    ///   period; 1 when the scheduler runs at the bit rate
    ///
    /// # Errors
    /// - [`Error::InvalidConfig`] if `config` does not validate or
    ///   `ticks_per_bit` is 0
    /// - [`Error::DeviceUnavailable`] if the output cannot be driven
    pub fn new(tx: TX, config: LinkConfig, ticks_per_bit: u16) -> Result<Self> {
        config.validate()?;
        if ticks_per_bit == 0 {
            return Err(Error::InvalidConfig("ticks per bit must be non-zero"));
        }
        let mut transmitter = Self {
            mode: TxMode::Idle,
            tx,
            config,
            ticks_per_bit,
            tick_counter: 0,
            frame: Frame::new(),
            index: 0,
            cycle: 0,
            tx_good: 0,
        };
        transmitter.write_tx(false)?;
        Ok(transmitter)
    }

    /// The link configuration.
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// The frame being sent, or the last one sent.
    pub fn frame(&self) -> &[bool] {
        &self.frame
    }

    /// Whether a frame is in flight.
    pub fn is_busy(&self) -> bool {
        self.mode == TxMode::Tx
    }

    fn write_tx(&mut self, on: bool) -> Result<()> {
        self.tx
            .set_state(PinState::from(on))
            .map_err(|_| Error::DeviceUnavailable)
    }

    fn set_mode_idle(&mut self) {
        self.mode = TxMode::Idle;
        self.tick_counter = 0;
    }

    /// Encodes `text`, frames it and starts transmitting.
    ///
    /// Characters outside `[A-Za-z0-9]` are dropped. The output is driven
    /// off first; the first bit goes out on the next bit-step.
    ///
    /// # Returns
    /// The number of bits in one frame.
    ///
    /// # Errors
    /// - [`Error::Busy`] if a frame is already in flight
    /// - [`Error::EmptyMessage`] if nothing is left after filtering
    /// - [`Error::MessageTooLong`] if the message does not fit one frame
    /// - [`Error::DeviceUnavailable`] if the output cannot be driven; nothing
    ///   is transmitted
    pub fn send(&mut self, text: &str) -> Result<usize> {
        if self.is_busy() {
            return Err(Error::Busy);
        }
        let payload = encode(text)?;
        if payload.is_empty() {
            warn!("no data to send after filtering");
            return Err(Error::EmptyMessage);
        }
        let frame = build(
            &payload,
            self.config.start_marker(),
            self.config.end_marker(),
        )?;
        self.send_frame(frame)?;
        info!(
            "submitting {} characters, {} bits per frame",
            payload.chars,
            self.frame.len()
        );
        Ok(self.frame.len())
    }

    /// Starts transmitting an already built frame.
    ///
    /// # Errors
    /// As [`send`](Self::send), minus the encoding errors.
    pub fn send_frame(&mut self, frame: Frame) -> Result<()> {
        if self.is_busy() {
            return Err(Error::Busy);
        }
        if frame.is_empty() {
            return Err(Error::EmptyMessage);
        }
        if let Err(e) = self.write_tx(false) {
            warn!("output device unavailable, not transmitting");
            return Err(e);
        }
        self.frame = frame;
        self.index = 0;
        self.cycle = 0;
        self.tick_counter = 0;
        self.mode = TxMode::Tx;
        Ok(())
    }

    /// Polls for the end of the current transmission.
    ///
    /// Returns [`nb::Error::WouldBlock`] while a frame is in flight.
    pub fn wait_sent(&self) -> nb::Result<(), Infallible> {
        if self.is_busy() {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }

    /// Advances the transmitter by one timing tick.
    ///
    /// Performs a bit-step every `ticks_per_bit` ticks; does nothing while
    /// idle.
    ///
    /// # Errors
    /// As [`step`](Self::step).
    pub fn tick(&mut self) -> Result<()> {
        if !self.is_busy() {
            return Ok(());
        }
        self.tick_counter += 1;
        if self.tick_counter >= self.ticks_per_bit {
            self.tick_counter = 0;
            self.step()?;
        }
        Ok(())
    }

    /// Sends the next bit of the frame.
    ///
    /// Must be called once per bit period. After the last bit of a cycle
    /// the frame restarts until `cycles` passes are done; the step after
    /// that forces the output off and returns to [`TxMode::Idle`].
    ///
    /// # Errors
    /// [`Error::DeviceUnavailable`] if the output fails; the transmission is
    /// abandoned.
    pub fn step(&mut self) -> Result<()> {
        if !self.is_busy() {
            return Ok(());
        }
        if self.index >= self.frame.len() {
            self.cycle += 1;
            if self.cycle >= self.config.cycles {
                self.set_mode_idle();
                self.write_tx(false)?;
                self.tx_good += 1;
                info!("transmission complete after {} cycles", self.cycle);
                return Ok(());
            }
            debug!("repeat {}", self.cycle);
            self.index = 0;
        }
        let bit = self.frame[self.index];
        if let Err(e) = self.write_tx(bit) {
            warn!("output device failed at bit {}", self.index);
            self.set_mode_idle();
            return Err(e);
        }
        self.index += 1;
        Ok(())
    }
}
