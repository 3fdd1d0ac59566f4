use core::cell::{Cell, RefCell};

use embedded_hal::i2c::I2c;

use crate::config::Config;
use crate::error::Error;
use crate::gpio::{self, LogicLevel};
use crate::pwm::DutyCycle;
use crate::registers::{Configuration, MASTER_INTENSITY_VALUE, Register};
use crate::shadow::ShadowRegisters;

mod gpio_pins;
mod interrupt;

/// Largest payload written after a register address (a port pair).
const MAX_REGISTER_PAYLOAD: usize = 2;

/// Driver for the MAX7314.
///
/// # Quick start
///
/// Create the driver with [`Max7314::new`] (or [`Max7314::with_config`]), then call
/// [`Max7314::init`] once, while the chip is still in its power-up state. The
/// driver keeps a shadow copy of the direction, output and intensity registers
/// starting from the power-up values, and never reads them back, so creating a
/// second driver for a chip that is already configured leaves the shadow and the
/// chip out of step.
///
/// Bulk operations take a `u16` bitfield where bit `n` is pin `n`; see the
/// constants in [`gpio`].
///
/// For per-pin use through the [`embedded_hal::digital`] and
/// [`embedded_hal::pwm`] traits, call [`Max7314::take_pins`].
///
/// # Errors and bus traffic
///
/// Methods take a shared reference. The bus and shadow registers sit behind
/// `RefCell`/`Cell`, which makes the driver `!Sync`: share it between threads only
/// behind your own lock.
///
/// Every bus write an operation needs is attempted, even if an earlier write in
/// the same operation failed. The first failure is returned. The shadow registers
/// are updated regardless, so ignoring the returned error leaves the driver in the
/// state it would be in had the writes succeeded.
///
/// Pin numbers and duty cycles are checked before anything is changed.
#[derive(Debug)]
pub struct Max7314<I2C> {
    /// Underlying I2C bus.
    bus: RefCell<I2C>,
    config: Config,
    shadow: Cell<ShadowRegisters>,
    /// Marker for whether the pin structs have been taken from the driver.
    ///
    /// See [`Self::take_pins`] for the only place it is used.
    pins_taken: Cell<bool>,
}

impl<I2C: I2c> Max7314<I2C> {
    ////////////////////////////////////////////////////////////////////////////////
    // Constructors
    ////////////////////////////////////////////////////////////////////////////////

    /// Create a driver for the expander at `address` with default settings.
    ///
    /// No bus traffic happens until [`Max7314::init`] is called.
    pub fn new(bus: I2C, address: u8) -> Self {
        Self::with_config(bus, Config::default().with_address(address))
    }

    /// Create a driver with the given settings.
    pub fn with_config(bus: I2C, config: Config) -> Self {
        Self {
            bus: RefCell::new(bus),
            config,
            shadow: Cell::new(ShadowRegisters::POWER_UP),
            pins_taken: Cell::new(false),
        }
    }

    /// Return the I2C bus, consuming the driver.
    pub fn release(self) -> I2C {
        self.bus.into_inner()
    }

    /// The I2C address of the expander.
    pub fn address(&self) -> u8 {
        self.config.address
    }

    /// Settings the driver was created with.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Copy of the shadow registers.
    pub fn shadow(&self) -> ShadowRegisters {
        self.shadow.get()
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Register access
    ////////////////////////////////////////////////////////////////////////////////

    /// Write `data` to consecutive registers starting at `register`.
    ///
    /// An empty `data` just sets the register pointer for a following read.
    fn write_register(&self, register: u8, data: &[u8]) -> Result<(), Error<I2C::Error>> {
        debug_assert!(data.len() <= MAX_REGISTER_PAYLOAD);
        let mut buf = [0u8; MAX_REGISTER_PAYLOAD + 1];
        buf[0] = register;
        buf[1..=data.len()].copy_from_slice(data);

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "MAX7314 {=u8:#x}: write {=u8:#x} {:#x}",
            self.config.address,
            register,
            data
        );

        self.bus
            .borrow_mut()
            .write(self.config.address, &buf[..=data.len()])
            .map_err(Error::Bus)
    }

    /// Apply `change` to the shadow registers and return what it returns.
    fn update_shadow<R>(&self, change: impl FnOnce(&mut ShadowRegisters) -> R) -> R {
        let mut shadow = self.shadow.get();
        let result = change(&mut shadow);
        self.shadow.set(shadow);
        result
    }

    fn write_static_outputs(&self) -> Result<(), Error<I2C::Error>> {
        let bytes = self.shadow.get().static_output_bytes();
        self.write_register(Register::Output.address(), &bytes)
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Initialisation
    ////////////////////////////////////////////////////////////////////////////////

    /// Configure the expander for GPIO and per-pin PWM use.
    ///
    /// Writes the configuration register (blink off, global intensity off,
    /// interrupt on) and a nonzero master intensity, which enables PWM.
    ///
    /// The chip must still be in its power-up state; see the type-level
    /// documentation. Both writes are attempted even if the first fails.
    ///
    /// # Datasheet
    ///
    /// See the configuration register and master intensity register tables.
    pub fn init(&self) -> Result<(), Error<I2C::Error>> {
        let config = self.write_register(
            Register::Configuration.address(),
            &[u8::from(Configuration::INIT)],
        );
        let intensity =
            self.write_register(Register::MasterIntensity.address(), &[MASTER_INTENSITY_VALUE]);
        config.and(intensity)
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Direction
    ////////////////////////////////////////////////////////////////////////////////

    /// Set the direction of all sixteen pins.
    ///
    /// A set bit makes the pin an input, a clear bit an output. The bitfield
    /// replaces the previous configuration outright and both port bytes are
    /// written in one transaction.
    ///
    /// Changing an output to an input can trigger a spurious interrupt.
    pub fn configure_pins(&self, direction: u16) -> Result<(), Error<I2C::Error>> {
        let bytes = self.update_shadow(|shadow| {
            shadow.replace_direction(direction);
            shadow.config_bytes()
        });

        #[cfg(feature = "defmt")]
        defmt::debug!("MAX7314 direction {=u16:#b}", direction);

        self.write_register(Register::PortConfiguration.address(), &bytes)
    }

    /// Make the pins in `bitfield` inputs, leaving the others as they were.
    pub fn configure_inputs(&self, bitfield: u16) -> Result<(), Error<I2C::Error>> {
        self.configure_pins(self.shadow.get().direction() | bitfield)
    }

    /// Make the pins in `bitfield` outputs, leaving the others as they were.
    pub fn configure_outputs(&self, bitfield: u16) -> Result<(), Error<I2C::Error>> {
        self.configure_pins(self.shadow.get().direction() & !bitfield)
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Inputs
    ////////////////////////////////////////////////////////////////////////////////

    /// Read the level of all sixteen pins.
    ///
    /// Bit `n` of the result is set if pin `n` reads high. Output pins report the
    /// level on the pin, not the level they are set to.
    ///
    /// Reading the input ports is also what releases the interrupt line, so this
    /// must be called after each interrupt before another one can occur.
    ///
    /// If the read fails for any reason, every pin is reported low. Use
    /// [`Max7314::try_read_pins`] to tell a failed read from all-low inputs.
    pub fn read_pins(&self) -> u16 {
        self.try_read_pins().unwrap_or_else(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("MAX7314 {=u8:#x}: input read failed", self.config.address);
            gpio::NO_PINS
        })
    }

    /// Read the level of all sixteen pins, reporting bus failures.
    ///
    /// # Errors
    ///
    /// [`Error::Bus`] if selecting the input register failed, and
    /// [`Error::PartialRead`] if fewer than two bytes were read.
    pub fn try_read_pins(&self) -> Result<u16, Error<I2C::Error>> {
        self.write_register(Register::Input.address(), &[])?;
        let mut buf = [0u8; 2];
        self.bus
            .borrow_mut()
            .read(self.config.address, &mut buf)
            .map_err(Error::PartialRead)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("MAX7314 {=u8:#x}: read {:#x}", self.config.address, buf);

        // Pins 0-7 arrive first.
        Ok(u16::from_le_bytes(buf))
    }

    ////////////////////////////////////////////////////////////////////////////////
    // Static outputs
    ////////////////////////////////////////////////////////////////////////////////

    /// Release (set high) the outputs in `bitfield`.
    ///
    /// Only meaningful for pins configured as outputs. A pin under PWM control
    /// should first be set to a duty cycle of 0 or 16.
    pub fn set_pins_high(&self, bitfield: u16) -> Result<(), Error<I2C::Error>> {
        self.update_shadow(|shadow| shadow.set_static_outputs(bitfield));
        self.write_static_outputs()
    }

    /// Drive low the outputs in `bitfield`.
    ///
    /// The same caveats as [`Max7314::set_pins_high`] apply.
    pub fn set_pins_low(&self, bitfield: u16) -> Result<(), Error<I2C::Error>> {
        self.update_shadow(|shadow| shadow.clear_static_outputs(bitfield));
        self.write_static_outputs()
    }

    ////////////////////////////////////////////////////////////////////////////////
    // PWM
    ////////////////////////////////////////////////////////////////////////////////

    /// Set the PWM duty cycle of a pin, in sixteenths.
    ///
    /// 0 drives the pin low all the time, 8 drives it low half the time, and 16
    /// releases it all the time. The pin must be configured as an output to have
    /// any effect. With [`PwmPolarity::ActiveLow`] the duty cycle is inverted first.
    ///
    /// Two writes are made: the static output register (the pin's bit is cleared
    /// for 0 and set otherwise), then the intensity register holding the pin.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPin`] if `pin` is above 15 and [`Error::InvalidDutyCycle`]
    /// if `duty_cycle` is above 16. Nothing is written in either case.
    ///
    /// [`PwmPolarity::ActiveLow`]: crate::pwm::PwmPolarity::ActiveLow
    pub fn set_output_pwm_value(&self, pin: u8, duty_cycle: u8) -> Result<(), Error<I2C::Error>> {
        let duty_cycle = DutyCycle::try_from(duty_cycle)
            .map_err(|duty_cycle| Error::InvalidDutyCycle(duty_cycle.into()))?;
        self.set_duty_cycle(pin, duty_cycle)
    }

    /// Set the PWM duty cycle of a pin.
    ///
    /// See [`Max7314::set_output_pwm_value`].
    pub fn set_duty_cycle(&self, pin: u8, duty_cycle: DutyCycle) -> Result<(), Error<I2C::Error>> {
        let mask = gpio::mask(pin).ok_or(Error::InvalidPin(pin))?;
        let encoded = self.config.pwm_polarity.apply(duty_cycle).encode();

        // The intensity code only takes effect while the output latch is high.
        match encoded.static_level {
            LogicLevel::High => self.update_shadow(|shadow| shadow.set_static_outputs(mask)),
            LogicLevel::Low => self.update_shadow(|shadow| shadow.clear_static_outputs(mask)),
        }
        let latch = self.write_static_outputs();

        let (index, value) = self.update_shadow(|shadow| shadow.set_pwm_code(pin, encoded.code));
        let intensity =
            self.write_register(Register::PwmIntensity.address() + index as u8, &[value]);

        latch.and(intensity)
    }
}
