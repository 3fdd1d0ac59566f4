use embedded_hal::i2c::I2c;

use super::Max7314;
use crate::gpio::Pins;

impl<I2C: I2c> Max7314<I2C> {
    /// Take the sixteen pin structs for individual GPIO and PWM operation.
    ///
    /// This can only be done once, and will return `None` afterwards.
    pub fn take_pins(&self) -> Option<Pins<'_, I2C>> {
        if self.pins_taken.get() {
            None
        } else {
            self.pins_taken.set(true);
            Some(Pins::new(self))
        }
    }
}
