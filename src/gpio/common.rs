/// GPIO pin level.
///
/// For an output, high means released: the MAX7314 ports are open-drain, so a
/// high output only reads high if something pulls it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogicLevel {
    /// Logic high, or released for an output.
    High,
    /// Logic low.
    Low,
}

impl LogicLevel {
    /// True if high.
    pub fn is_high(self) -> bool {
        matches!(self, LogicLevel::High)
    }

    /// True if low.
    pub fn is_low(self) -> bool {
        matches!(self, LogicLevel::Low)
    }
}

impl From<bool> for LogicLevel {
    fn from(value: bool) -> Self {
        if value { Self::High } else { Self::Low }
    }
}

impl From<LogicLevel> for bool {
    fn from(value: LogicLevel) -> Self {
        match value {
            LogicLevel::High => true,
            LogicLevel::Low => false,
        }
    }
}

/// GPIO pin direction.
///
/// In the port configuration register a set bit makes the pin an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinDirection {
    /// Pin reads its level (power-up state).
    Input,
    /// Pin drives its static output or PWM level.
    Output,
}

impl PinDirection {
    /// True if the pin is an input.
    pub fn is_input(self) -> bool {
        matches!(self, PinDirection::Input)
    }

    /// True if the pin is an output.
    pub fn is_output(self) -> bool {
        matches!(self, PinDirection::Output)
    }
}

impl From<bool> for PinDirection {
    /// Convert a port configuration bit (1 = input) into a direction.
    fn from(value: bool) -> Self {
        if value { Self::Input } else { Self::Output }
    }
}

impl From<PinDirection> for bool {
    /// Convert a direction into its port configuration bit (1 = input).
    fn from(value: PinDirection) -> Self {
        match value {
            PinDirection::Input => true,
            PinDirection::Output => false,
        }
    }
}
