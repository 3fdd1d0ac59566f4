//! Duty-cycle encoding for the output intensity registers.
//!
//! Each pin has a 4-bit intensity code. Codes `0x0..=0xE` give a duty cycle of
//! `(code + 1) / 16`. Code `0xF` is shared by the two boundary states, which are
//! told apart by the pin's static output bit: low gives 0%, high gives 100%.

use crate::gpio::LogicLevel;

/// Largest duty cycle, in sixteenths.
pub const MAX_DUTY_CYCLE: u8 = 16;

/// Intensity code used for both the 0% and 100% states.
pub const BOUNDARY_CODE: u8 = 0x0F;

/// A PWM duty cycle in sixteenths, in the range 0..=16.
///
/// 0 drives the pin low all the time; 16 releases it (high impedance) all the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyCycle(u8);

impl DutyCycle {
    /// Always low.
    pub const OFF: Self = Self(0);
    /// Always released.
    pub const FULL: Self = Self(MAX_DUTY_CYCLE);

    /// Create a duty cycle, returning `None` if `sixteenths` is above 16.
    pub const fn new(sixteenths: u8) -> Option<Self> {
        if sixteenths <= MAX_DUTY_CYCLE {
            Some(Self(sixteenths))
        } else {
            None
        }
    }

    /// The duty cycle in sixteenths.
    pub const fn sixteenths(self) -> u8 {
        self.0
    }

    /// The complementary duty cycle, `16 - self`.
    pub const fn inverted(self) -> Self {
        Self(MAX_DUTY_CYCLE - self.0)
    }

    /// Intensity code and static output level that together produce this duty cycle.
    ///
    /// Every non-zero duty cycle needs the static output bit set, as the MAX7314
    /// only modulates pins whose output latch is high.
    pub const fn encode(self) -> Encoded {
        match self.0 {
            0 => Encoded {
                code: BOUNDARY_CODE,
                static_level: LogicLevel::Low,
            },
            MAX_DUTY_CYCLE => Encoded {
                code: BOUNDARY_CODE,
                static_level: LogicLevel::High,
            },
            d => Encoded {
                code: d - 1,
                static_level: LogicLevel::High,
            },
        }
    }
}

impl TryFrom<u8> for DutyCycle {
    type Error = u8;

    /// Fails with the rejected value if it is above 16.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(value)
    }
}

impl From<DutyCycle> for u8 {
    fn from(value: DutyCycle) -> u8 {
        value.0
    }
}

/// Register contents for one pin's duty cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Encoded {
    /// 4-bit intensity code.
    pub code: u8,
    /// Level the pin's static output bit must hold.
    pub static_level: LogicLevel,
}

/// How the duty-cycle argument maps onto the pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmPolarity {
    /// The duty cycle is the fraction of time the pin is released (high).
    #[default]
    ActiveHigh,
    /// The duty cycle is the fraction of time the pin is driven low.
    ///
    /// Suits LEDs wired from the supply to the pin, so that 0 is off and 16 is
    /// full brightness.
    ActiveLow,
}

impl PwmPolarity {
    /// Convert a caller's duty cycle into the duty cycle of the released state.
    pub const fn apply(self, duty_cycle: DutyCycle) -> DutyCycle {
        match self {
            PwmPolarity::ActiveHigh => duty_cycle,
            PwmPolarity::ActiveLow => duty_cycle.inverted(),
        }
    }
}

/// Location of a pin's intensity code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    /// Offset from the first intensity register.
    pub(crate) register_index: usize,
    /// Bit offset of the code within the register: 0 for even pins, 4 for odd pins.
    pub(crate) shift: usize,
}

impl Slot {
    /// Caller guarantees `pin < 16`.
    pub(crate) const fn for_pin(pin: u8) -> Self {
        let pins_per_register = crate::registers::PINS_PER_PWM_REGISTER;
        Self {
            register_index: (pin / pins_per_register) as usize,
            shift: (pin % pins_per_register) as usize * 4,
        }
    }
}
