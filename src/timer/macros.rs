/// Declares a static global `TRANSMITTER` protected by a `critical_section` mutex.
///
/// This macro creates a `static` slot suitable for interrupt-based
/// environments, where both the main thread and an ISR need to safely
/// access the same transmitter. The slot starts empty.
///
/// # Arguments
/// - `$tx`: The concrete type of the output pin (must implement `OutputPin`)
///
/// # Example
/// ```rust,ignore
/// init_transmitter!(MyLedPinType);
/// ```
#[macro_export]
macro_rules! init_transmitter {
    ( $tx:ty ) => {
        pub static TRANSMITTER: $crate::timer::SharedTransmitter<$tx> =
            $crate::timer::global_transmitter_init::<$tx>();
    };
}

/// Builds a transmitter into the global `TRANSMITTER` slot.
///
/// Expands to a `Result`, see
/// [`global_transmitter_setup`](crate::timer::global_transmitter_setup).
///
/// # Arguments
/// - `$tx`: The output pin
/// - `$config`: The [`LinkConfig`](crate::config::LinkConfig)
/// - `$tpb`: Interrupts per bit period
///
/// # Example
/// ```rust,ignore
/// fn main() {
///     setup_transmitter!(led, LinkConfig::new(10), 100).unwrap();
/// }
/// ```
///
/// # Notes
/// - Requires `init_transmitter!` to have been used earlier.
#[macro_export]
macro_rules! setup_transmitter {
    ( $tx:expr, $config:expr, $tpb:expr $(,)? ) => {
        $crate::timer::global_transmitter_setup(&TRANSMITTER, $tx, $config, $tpb)
    };
}

/// Calls `tick()` on the global `TRANSMITTER` if it has been set up.
///
/// This macro is intended to be invoked from a timer ISR to advance the
/// transmitter at regular intervals.
///
/// # Example
/// ```rust,ignore
/// #[interrupt]
/// fn TIM2() {
///     tick_transmitter!();
/// }
/// ```
///
/// # Notes
/// - Safe to call repeatedly: does nothing while the slot is empty or the
///   transmitter is idle.
#[macro_export]
macro_rules! tick_transmitter {
    () => {
        $crate::timer::global_transmitter_tick(&TRANSMITTER)
    };
}

#[cfg(test)]
mod tests {
    use crate::config::LinkConfig;
    use crate::timer::global_transmitter_busy;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    init_transmitter!(PinMock);

    #[test]
    fn test_macros_drive_global_transmitter() {
        let pin = PinMock::new(&[
            PinTransaction::set(PinState::Low),
        ]);
        setup_transmitter!(pin, LinkConfig::default(), 4).unwrap();
        tick_transmitter!();
        assert!(!global_transmitter_busy(&TRANSMITTER));

        let mut transmitter = critical_section::with(|cs| TRANSMITTER.borrow(cs).take()).unwrap();
        transmitter.tx.done();
    }
}
