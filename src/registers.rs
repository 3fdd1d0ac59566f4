//! MAX7314 register map and the fixed values written at initialisation.
//!
//! Multi-byte registers auto-increment, so only the first address of each group
//! is named here: writing `[base, low, high]` fills both bytes of a port pair.

use bit_field::BitField;

/// Register addresses used by the driver.
///
/// # Datasheet
///
/// See the register address map (table 2) in the MAX7314 datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Input port levels, pins 0-7 then pins 8-15. Read-only.
    ///
    /// Reading this register clears a pending interrupt.
    Input = 0x00,
    /// Static output levels (blink phase 0), pins 0-7 then pins 8-15.
    Output = 0x02,
    /// Port direction, pins 0-7 then pins 8-15. 1 = input, 0 = output.
    PortConfiguration = 0x06,
    /// Master intensity (and O16 intensity).
    ///
    /// PWM is disabled while the master intensity is zero.
    MasterIntensity = 0x0E,
    /// Device configuration: blink, global intensity and interrupt enables.
    Configuration = 0x0F,
    /// First of the eight output intensity registers, two pins per register.
    PwmIntensity = 0x10,
}

impl Register {
    /// The register address as written to the bus.
    pub const fn address(self) -> u8 {
        self as u8
    }
}

/// Number of output intensity registers.
pub const PWM_REGISTER_COUNT: usize = 8;

/// Pins sharing one output intensity register.
pub const PINS_PER_PWM_REGISTER: u8 = 2;

/// Value written to the master intensity register by `init`.
///
/// Any nonzero master intensity enables per-pin PWM.
pub const MASTER_INTENSITY_VALUE: u8 = 0xFF;

/// Bit positions in the configuration register.
mod config_bits {
    pub(super) const BLINK_ENABLE: usize = 0;
    pub(super) const BLINK_FLIP: usize = 1;
    pub(super) const GLOBAL_INTENSITY: usize = 2;
    pub(super) const INTERRUPT_ENABLE: usize = 3;
}

/// Contents of the configuration register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Configuration {
    /// Blink phases enabled.
    pub blink_enabled: bool,
    /// Blink phase flip bit.
    pub blink_flip: bool,
    /// Single global intensity for all pins instead of per-pin intensity.
    pub global_intensity: bool,
    /// Input change interrupt enabled.
    pub interrupt_enabled: bool,
}

impl Configuration {
    /// Settings written by `init`.
    ///
    /// Blink disabled, global intensity disabled (so each pin uses its own
    /// intensity register), interrupt enabled.
    pub const INIT: Self = Self {
        blink_enabled: false,
        blink_flip: false,
        global_intensity: false,
        interrupt_enabled: true,
    };
}

impl From<u8> for Configuration {
    fn from(byte: u8) -> Self {
        Self {
            blink_enabled: byte.get_bit(config_bits::BLINK_ENABLE),
            blink_flip: byte.get_bit(config_bits::BLINK_FLIP),
            global_intensity: byte.get_bit(config_bits::GLOBAL_INTENSITY),
            interrupt_enabled: byte.get_bit(config_bits::INTERRUPT_ENABLE),
        }
    }
}

impl From<Configuration> for u8 {
    fn from(config: Configuration) -> u8 {
        let mut byte = 0u8;
        byte.set_bit(config_bits::BLINK_ENABLE, config.blink_enabled);
        byte.set_bit(config_bits::BLINK_FLIP, config.blink_flip);
        byte.set_bit(config_bits::GLOBAL_INTENSITY, config.global_intensity);
        byte.set_bit(config_bits::INTERRUPT_ENABLE, config.interrupt_enabled);
        byte
    }
}
