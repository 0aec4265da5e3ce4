use crate::config::LinkConfig;
use crate::error::{Error, Result};
use crate::transmitter::Transmitter;
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::OutputPin;

/// A transmitter shared between the main loop and a timer interrupt.
pub type SharedTransmitter<TX> = Mutex<RefCell<Option<Transmitter<TX>>>>;

/// Used to initialize a global static `Transmitter` for use with
/// `critical_section`.
///
/// # Returns
/// * An empty mutable ref-cell
///
/// # Example
/// ```rust,ignore
/// use lightcom::timer::{SharedTransmitter, global_transmitter_init};
/// use some_hal::PD1;
///
/// static TRANSMITTER: SharedTransmitter<PD1> = global_transmitter_init::<PD1>();
/// ```
pub const fn global_transmitter_init<TX: OutputPin>() -> SharedTransmitter<TX> {
    Mutex::new(RefCell::new(None))
}

/// Builds a `Transmitter` and stores it in the global slot.
///
/// # Arguments
/// * The global static transmitter
/// * The tx pin
/// * The link configuration
/// * The number of interrupts per bit, see [`ticks_per_bit`](crate::timer::ticks_per_bit)
///
/// # Errors
/// Any error from [`Transmitter::new`]; the slot is left untouched.
pub fn global_transmitter_setup<TX: OutputPin>(
    global: &'static SharedTransmitter<TX>,
    tx: TX,
    config: LinkConfig,
    ticks_per_bit: u16,
) -> Result<()> {
    let transmitter = Transmitter::new(tx, config, ticks_per_bit)?;
    critical_section::with(|cs| {
        let _ = global.borrow(cs).replace(Some(transmitter));
    });
    Ok(())
}

/// Queues `text` on the global transmitter.
///
/// # Errors
/// [`Error::DeviceUnavailable`] if the slot has not been set up, otherwise
/// any error from [`Transmitter::send`].
pub fn global_transmitter_send<TX: OutputPin>(
    global: &'static SharedTransmitter<TX>,
    text: &str,
) -> Result<usize> {
    critical_section::with(|cs| match global.borrow(cs).borrow_mut().as_mut() {
        Some(transmitter) => transmitter.send(text),
        None => Err(Error::DeviceUnavailable),
    })
}

/// Whether the global transmitter is still sending.
pub fn global_transmitter_busy<TX: OutputPin>(global: &'static SharedTransmitter<TX>) -> bool {
    critical_section::with(|cs| {
        global
            .borrow(cs)
            .borrow()
            .as_ref()
            .is_some_and(Transmitter::is_busy)
    })
}

/// Runs the tick at each interrupt
///
/// Does nothing until the slot has been set up. A device failure abandons
/// the frame; the transmitter reports it by going idle.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     global_transmitter_tick(&TRANSMITTER);
/// }
/// ```
pub fn global_transmitter_tick<TX: OutputPin>(global: &'static SharedTransmitter<TX>) {
    critical_section::with(|cs| {
        if let Some(transmitter) = global.borrow(cs).borrow_mut().as_mut() {
            if let Err(e) = transmitter.tick() {
                warn!("transmission abandoned: {}", e);
            }
        }
    });
}
