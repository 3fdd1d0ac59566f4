use embedded_hal::i2c::I2c;

use super::{LogicLevel, PinDirection};
use crate::pwm::{DutyCycle, MAX_DUTY_CYCLE};
use crate::{Error, Max7314};

/// A MAX7314 pin that can be configured as a GPIO input or output.
#[derive(Debug)]
pub struct ExpanderPin<'a, I2C> {
    driver: &'a Max7314<I2C>,
    number: u8,
}

impl<'a, I2C: I2c> ExpanderPin<'a, I2C> {
    /// Pin number, 0..=15.
    pub fn number(&self) -> u8 {
        self.number
    }

    fn mask(&self) -> u16 {
        1 << self.number
    }

    /// Direction of this pin according to the driver's shadow registers.
    pub fn direction(&self) -> PinDirection {
        (self.driver.shadow().direction() & self.mask() != 0).into()
    }

    /// Set up the pin as a digital input.
    ///
    /// Only this pin's direction bit changes. You can retrieve the pin (for
    /// reconfiguration as an output) by calling [`Input::destroy`].
    pub fn configure_as_input(self) -> Result<Input<'a, I2C>, Error<I2C::Error>> {
        self.driver.configure_inputs(self.mask())?;
        Ok(Input(self))
    }

    /// Set up the pin as a digital or PWM output.
    ///
    /// Only this pin's direction bit changes. The pin starts at whatever static
    /// level and intensity the shadow registers hold (released, after power-up).
    pub fn configure_as_output(self) -> Result<Output<'a, I2C>, Error<I2C::Error>> {
        self.driver.configure_outputs(self.mask())?;
        Ok(Output(self))
    }
}

impl<'a, I2C: I2c> TryFrom<ExpanderPin<'a, I2C>> for Input<'a, I2C> {
    type Error = Error<I2C::Error>;
    fn try_from(pin: ExpanderPin<'a, I2C>) -> Result<Self, Self::Error> {
        pin.configure_as_input()
    }
}

impl<'a, I2C: I2c> TryFrom<ExpanderPin<'a, I2C>> for Output<'a, I2C> {
    type Error = Error<I2C::Error>;
    fn try_from(pin: ExpanderPin<'a, I2C>) -> Result<Self, Self::Error> {
        pin.configure_as_output()
    }
}

/// A MAX7314 pin in input mode.
#[derive(Debug)]
pub struct Input<'a, I2C>(ExpanderPin<'a, I2C>);

impl<'a, I2C: I2c> Input<'a, I2C> {
    /// Read the level of this pin.
    ///
    /// This reads all sixteen inputs, so it also acknowledges a pending interrupt.
    pub fn get_level(&self) -> Result<LogicLevel, Error<I2C::Error>> {
        let levels = self.0.driver.try_read_pins()?;
        Ok((levels & self.0.mask() != 0).into())
    }

    /// Return the underlying pin, so that it can be reconfigured.
    ///
    /// This method does not change any MAX7314 settings.
    pub fn destroy(self) -> ExpanderPin<'a, I2C> {
        self.0
    }

    /// Switch the pin from input to output.
    pub fn try_into_output(self) -> Result<Output<'a, I2C>, Error<I2C::Error>> {
        self.0.configure_as_output()
    }
}

impl<I2C: I2c> embedded_hal::digital::ErrorType for Input<'_, I2C> {
    type Error = Error<I2C::Error>;
}

impl<I2C: I2c> embedded_hal::digital::InputPin for Input<'_, I2C> {
    fn is_high(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.get_level().map(LogicLevel::is_high)
    }

    fn is_low(&mut self) -> Result<bool, Error<I2C::Error>> {
        self.get_level().map(LogicLevel::is_low)
    }
}

/// A MAX7314 pin in output mode.
///
/// The pin can be driven statically with [`Output::set_level`] or modulated with
/// [`Output::set_pwm`]. Before switching from PWM back to static control, set the
/// duty cycle to 0 or 16.
#[derive(Debug)]
pub struct Output<'a, I2C>(ExpanderPin<'a, I2C>);

impl<'a, I2C: I2c> Output<'a, I2C> {
    /// Set the static output level of this pin.
    pub fn set_level(&self, level: LogicLevel) -> Result<(), Error<I2C::Error>> {
        match level {
            LogicLevel::High => self.0.driver.set_pins_high(self.0.mask()),
            LogicLevel::Low => self.0.driver.set_pins_low(self.0.mask()),
        }
    }

    /// The static output level last set for this pin.
    ///
    /// This comes from the shadow registers; no bus traffic happens. While the
    /// pin is under PWM control it reports high.
    pub fn get_output_level(&self) -> LogicLevel {
        (self.0.driver.shadow().static_outputs() & self.0.mask() != 0).into()
    }

    /// Set the PWM duty cycle of this pin.
    pub fn set_pwm(&self, duty_cycle: DutyCycle) -> Result<(), Error<I2C::Error>> {
        self.0.driver.set_duty_cycle(self.0.number, duty_cycle)
    }

    /// Return the underlying pin, so that it can be reconfigured.
    ///
    /// This method does not change any MAX7314 settings.
    pub fn destroy(self) -> ExpanderPin<'a, I2C> {
        self.0
    }

    /// Switch the pin from output to input.
    pub fn try_into_input(self) -> Result<Input<'a, I2C>, Error<I2C::Error>> {
        self.0.configure_as_input()
    }
}

impl<I2C: I2c> embedded_hal::digital::ErrorType for Output<'_, I2C> {
    type Error = Error<I2C::Error>;
}

impl<I2C: I2c> embedded_hal::digital::OutputPin for Output<'_, I2C> {
    fn set_low(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_level(LogicLevel::Low)
    }

    fn set_high(&mut self) -> Result<(), Error<I2C::Error>> {
        self.set_level(LogicLevel::High)
    }
}

impl<I2C: I2c> embedded_hal::digital::StatefulOutputPin for Output<'_, I2C> {
    fn is_set_high(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.get_output_level().is_high())
    }

    fn is_set_low(&mut self) -> Result<bool, Error<I2C::Error>> {
        Ok(self.get_output_level().is_low())
    }
}

impl<I2C: I2c> embedded_hal::pwm::ErrorType for Output<'_, I2C> {
    type Error = Error<I2C::Error>;
}

impl<I2C: I2c> embedded_hal::pwm::SetDutyCycle for Output<'_, I2C> {
    /// Duty cycles are in sixteenths.
    fn max_duty_cycle(&self) -> u16 {
        MAX_DUTY_CYCLE as u16
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Error<I2C::Error>> {
        let duty_cycle = u8::try_from(duty)
            .ok()
            .and_then(DutyCycle::new)
            .ok_or(Error::InvalidDutyCycle(duty))?;
        self.set_pwm(duty_cycle)
    }
}

impl<'a, I2C: I2c> TryFrom<Output<'a, I2C>> for Input<'a, I2C> {
    type Error = Error<I2C::Error>;

    fn try_from(value: Output<'a, I2C>) -> Result<Self, Self::Error> {
        value.try_into_input()
    }
}

impl<'a, I2C: I2c> TryFrom<Input<'a, I2C>> for Output<'a, I2C> {
    type Error = Error<I2C::Error>;

    fn try_from(value: Input<'a, I2C>) -> Result<Self, Self::Error> {
        value.try_into_output()
    }
}

/// The sixteen MAX7314 pins.
#[derive(Debug)]
#[allow(missing_docs)]
pub struct Pins<'a, I2C> {
    pub p0: ExpanderPin<'a, I2C>,
    pub p1: ExpanderPin<'a, I2C>,
    pub p2: ExpanderPin<'a, I2C>,
    pub p3: ExpanderPin<'a, I2C>,
    pub p4: ExpanderPin<'a, I2C>,
    pub p5: ExpanderPin<'a, I2C>,
    pub p6: ExpanderPin<'a, I2C>,
    pub p7: ExpanderPin<'a, I2C>,
    pub p8: ExpanderPin<'a, I2C>,
    pub p9: ExpanderPin<'a, I2C>,
    pub p10: ExpanderPin<'a, I2C>,
    pub p11: ExpanderPin<'a, I2C>,
    pub p12: ExpanderPin<'a, I2C>,
    pub p13: ExpanderPin<'a, I2C>,
    pub p14: ExpanderPin<'a, I2C>,
    pub p15: ExpanderPin<'a, I2C>,
}

impl<'a, I2C> Pins<'a, I2C> {
    pub(crate) fn new(driver: &'a Max7314<I2C>) -> Self {
        let [
            p0, p1, p2, p3, p4, p5, p6, p7, p8, p9, p10, p11, p12, p13, p14, p15,
        ] = core::array::from_fn(|number| ExpanderPin {
            driver,
            number: number as u8,
        });
        Self {
            p0, p1, p2, p3, p4, p5, p6, p7, p8, p9, p10, p11, p12, p13, p14, p15,
        }
    }
}
