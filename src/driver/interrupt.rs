use embedded_hal::i2c::I2c;

use super::Max7314;
use crate::Error;
use crate::interrupt::InterruptRegistrar;

impl<I2C: I2c> Max7314<I2C> {
    /// Initialise the expander and attach `callback` to the host pin wired to INT.
    ///
    /// This performs [`Max7314::init`] and then registers `callback` for falling
    /// edges on host GPIO `pin`. The registration is made even if an init write
    /// failed; the first write error is returned afterwards.
    ///
    /// `callback` runs in interrupt context. INT stays asserted, and no further
    /// callbacks happen, until [`Max7314::read_pins`] is called.
    pub fn init_with_interrupt<R: InterruptRegistrar>(
        &self,
        registrar: &mut R,
        pin: u8,
        callback: fn(),
    ) -> Result<(), Error<I2C::Error>> {
        let init = self.init();
        registrar.register_falling_edge(pin, callback);

        #[cfg(feature = "defmt")]
        defmt::debug!("MAX7314 {=u8:#x}: interrupt on host pin {=u8}", self.address(), pin);

        init
    }

    /// Wait for INT to be asserted, then read (and so acknowledge) the inputs.
    ///
    /// `line` is the host input wired to INT. The wait is for a low level rather
    /// than an edge, so an interrupt that was already pending is not missed.
    ///
    /// # Errors
    ///
    /// [`Error::InterruptLine`] if waiting on `line` fails, otherwise as
    /// [`Max7314::try_read_pins`].
    #[cfg(feature = "async")]
    pub async fn wait_for_input_change<P>(&self, line: &mut P) -> Result<u16, Error<I2C::Error>>
    where
        P: embedded_hal_async::digital::Wait,
    {
        use embedded_hal::digital::Error as _;

        line.wait_for_low()
            .await
            .map_err(|e| Error::InterruptLine(e.kind()))?;
        self.try_read_pins()
    }
}
