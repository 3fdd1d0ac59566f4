/// Wrapper for problems when communicating with the MAX7314.
///
/// `E` is the error type of the underlying I2C bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// A register write was not completed by the I2C bus.
    ///
    /// This includes the register-pointer write that precedes a read.
    Bus(E),
    /// Fewer than the two input bytes were delivered when reading the input ports.
    ///
    /// [`Max7314::read_pins`] hides this and reports every pin as low instead.
    ///
    /// [`Max7314::read_pins`]: crate::Max7314::read_pins
    PartialRead(E),
    /// Pin number not in the range 0..=15.
    InvalidPin(u8),
    /// Duty cycle not in the range 0..=16.
    ///
    /// Holds the rejected value as passed in.
    InvalidDutyCycle(u16),
    /// Waiting on the interrupt line failed.
    #[cfg(feature = "async")]
    InterruptLine(embedded_hal::digital::ErrorKind),
}

impl<E: core::fmt::Debug> embedded_hal::digital::Error for Error<E> {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl<E: core::fmt::Debug> embedded_hal::pwm::Error for Error<E> {
    fn kind(&self) -> embedded_hal::pwm::ErrorKind {
        embedded_hal::pwm::ErrorKind::Other
    }
}
