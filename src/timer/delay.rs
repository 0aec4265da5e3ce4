use crate::error::Result;
use crate::timer::bit_period_us;
use crate::transmitter::Transmitter;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Runs a blocking loop that steps the transmitter until its frame is sent.
///
/// This is a simple timing loop for use in environments where interrupts are
/// unavailable or undesired. One bit-step is taken per bit period, timed by a
/// delay provider implementing `embedded_hal::delay::DelayNs`.
///
/// # Arguments
/// - `transmitter`: a transmitter with a frame queued by `send()`
/// - `delay`: a delay provider, typically from the HAL
///
/// # Example
/// ```rust,ignore
/// use lightcom::timer::run_transmit_loop;
/// transmitter.send("HELLO")?;
/// run_transmit_loop(&mut transmitter, &mut delay)?;
/// ```
///
/// # Notes
/// - Returns as soon as the transmitter is idle again; does nothing if no
///   frame is queued.
/// - Bit timing drifts by however long each `step()` takes. For tighter
///   timing, prefer interrupt-driven tick scheduling.
///
/// # Errors
/// [`Error::DeviceUnavailable`](crate::error::Error::DeviceUnavailable) if the
/// output fails mid-frame.
pub fn run_transmit_loop<D, TX>(transmitter: &mut Transmitter<TX>, delay: &mut D) -> Result<()>
where
    D: DelayNs,
    TX: OutputPin,
{
    let period_us = bit_period_us(transmitter.config().frequency_hz);
    while transmitter.wait_sent().is_err() {
        transmitter.step()?;
        delay.delay_us(period_us);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkConfig;
    use crate::consts::{END_MARKER, START_MARKER};
    use crate::encoding::encode;
    use crate::frame::build;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[test]
    fn test_run_transmit_loop_sends_whole_frame() {
        let frame = build(&encode("ok").unwrap(), &START_MARKER, &END_MARKER).unwrap();
        let mut writes = vec![
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::Low),
        ];
        for _ in 0..2 {
            writes.extend(frame.iter().map(|&bit| {
                PinTransaction::set(if bit { PinState::High } else { PinState::Low })
            }));
        }
        writes.push(PinTransaction::set(PinState::Low));

        let tx = PinMock::new(&writes);
        let mut transmitter = Transmitter::new(tx, LinkConfig::default(), 1).unwrap();
        let _ = transmitter.send("ok").unwrap();

        run_transmit_loop(&mut transmitter, &mut NoopDelay::new()).unwrap();
        assert!(!transmitter.is_busy());
        assert_eq!(transmitter.tx_good, 1);
        transmitter.tx.done();
    }

    #[test]
    fn test_run_transmit_loop_idle_is_noop() {
        let tx = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let mut transmitter = Transmitter::new(tx, LinkConfig::default(), 1).unwrap();

        run_transmit_loop(&mut transmitter, &mut NoopDelay::new()).unwrap();
        assert_eq!(transmitter.tx_good, 0);
        transmitter.tx.done();
    }
}
