//! Driver configuration.

use crate::pwm::PwmPolarity;

// The address is set by the AD0 pin wiring. These are the two used when two
// expanders share a bus; any other valid address can be passed as a `u8`.

/// Bus address of the first expander: inputs plus PWM and GPIO outputs.
pub const EXPANDER_1_ADDRESS: u8 = 0x20;
/// Bus address of the second expander: GPIO outputs.
pub const EXPANDER_2_ADDRESS: u8 = 0x24;

/// Settings fixed for the lifetime of a [`Max7314`] driver.
///
/// This offers a builder-like interface over the defaults:
///
/// ```
/// use max7314_hal::{Config, EXPANDER_2_ADDRESS, pwm::PwmPolarity};
///
/// let config = Config::default()
///     .with_address(EXPANDER_2_ADDRESS)
///     .with_pwm_polarity(PwmPolarity::ActiveLow);
/// assert_eq!(config.address, 0x24);
/// ```
///
/// [`Max7314`]: crate::Max7314
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// 7-bit I2C address of the expander.
    pub address: u8,
    /// Meaning of the duty cycle passed to [`Max7314::set_output_pwm_value`].
    ///
    /// [`Max7314::set_output_pwm_value`]: crate::Max7314::set_output_pwm_value
    pub pwm_polarity: PwmPolarity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: EXPANDER_1_ADDRESS,
            pwm_polarity: PwmPolarity::ActiveHigh,
        }
    }
}

impl Config {
    /// Use the given I2C address.
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Use the given PWM polarity.
    pub fn with_pwm_polarity(mut self, polarity: PwmPolarity) -> Self {
        self.pwm_polarity = polarity;
        self
    }
}
