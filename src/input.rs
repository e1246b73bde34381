//! Digital input ports.
//!
//! A port is a group of input lines read as one 8-bit snapshot. On the
//! nRF52840 the lines are individual GPIOs, so [`PinGroup`] assembles the
//! byte from `embedded-hal` input pins placed at fixed bit positions.
//! Bits without a pin read as 1, the same as a pulled-up idle line.

use embedded_hal::digital::InputPin;

use crate::hid::report::PortSnapshot;

/// Snapshot read of a group of digital lines.
pub trait DigitalInputPort {
    /// Read all lines at once. Bit n is line n's level (1 = high).
    fn read(&mut self) -> u8;
}

impl<F> DigitalInputPort for F
where
    F: FnMut() -> u8,
{
    fn read(&mut self) -> u8 {
        self()
    }
}

/// Up to eight input pins, each mapped to a bit of the port byte.
pub struct PinGroup<P, const N: usize> {
    pins: [(u8, P); N],
}

impl<P: InputPin, const N: usize> PinGroup<P, N> {
    /// Build from `(bit, pin)` pairs. Bits must be in `0..8`.
    pub fn new(pins: [(u8, P); N]) -> Self {
        debug_assert!(pins.iter().all(|(bit, _)| *bit < 8));
        Self { pins }
    }
}

impl<P: InputPin, const N: usize> DigitalInputPort for PinGroup<P, N> {
    fn read(&mut self) -> u8 {
        let mut raw = 0xFF;
        for (bit, pin) in self.pins.iter_mut() {
            // A failed read counts as high: the line is treated as released.
            if matches!(pin.is_low(), Ok(true)) {
                raw &= !(1 << *bit);
            }
        }
        raw
    }
}

/// Source of [`PortSnapshot`]s for the poll loop.
pub trait InputSampler {
    fn sample(&mut self) -> PortSnapshot;
}

/// The three ports a report is built from.
pub struct InputPorts<S, L, H> {
    pub stick: S,
    pub buttons_low: L,
    pub buttons_high: H,
}

impl<S, L, H> InputPorts<S, L, H>
where
    S: DigitalInputPort,
    L: DigitalInputPort,
    H: DigitalInputPort,
{
    pub fn new(stick: S, buttons_low: L, buttons_high: H) -> Self {
        Self {
            stick,
            buttons_low,
            buttons_high,
        }
    }
}

impl<S, L, H> InputSampler for InputPorts<S, L, H>
where
    S: DigitalInputPort,
    L: DigitalInputPort,
    H: DigitalInputPort,
{
    fn sample(&mut self) -> PortSnapshot {
        PortSnapshot {
            stick: self.stick.read(),
            buttons_low: self.buttons_low.read(),
            buttons_high: self.buttons_high.read(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    /// Pin with a fixed level.
    struct FixedPin {
        low: bool,
    }

    impl ErrorType for FixedPin {
        type Error = Infallible;
    }

    impl InputPin for FixedPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.low)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.low)
        }
    }

    #[derive(Debug)]
    struct ReadFault;

    impl Error for ReadFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Pin whose reads always fail.
    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ReadFault;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(ReadFault)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(ReadFault)
        }
    }

    #[test]
    fn pin_group_clears_bits_of_low_pins() {
        let mut port = PinGroup::new([
            (0, FixedPin { low: true }),
            (1, FixedPin { low: false }),
            (5, FixedPin { low: true }),
        ]);
        assert_eq!(port.read(), 0b1101_1110);
    }

    #[test]
    fn pin_group_unassigned_bits_read_high() {
        let mut port: PinGroup<FixedPin, 0> = PinGroup::new([]);
        assert_eq!(port.read(), 0xFF);
    }

    #[test]
    fn pin_group_failed_read_counts_as_released() {
        let mut port = PinGroup::new([(3, BrokenPin)]);
        assert_eq!(port.read(), 0xFF);
    }

    #[test]
    fn closures_are_ports() {
        let mut level = 0xF0u8;
        let mut port = || {
            level ^= 0xFF;
            level
        };
        assert_eq!(DigitalInputPort::read(&mut port), 0x0F);
        assert_eq!(DigitalInputPort::read(&mut port), 0xF0);
    }

    #[test]
    fn input_ports_sample_each_port_once() {
        let mut ports = InputPorts::new(|| 0xFBu8, || 0x3Du8, || 0x7Fu8);
        assert_eq!(
            ports.sample(),
            PortSnapshot {
                stick: 0xFB,
                buttons_low: 0x3D,
                buttons_high: 0x7F,
            }
        );
    }
}
