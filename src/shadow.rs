use bit_field::BitField;

use crate::gpio::{self, LogicLevel, PinDirection};
use crate::pwm::Slot;
use crate::registers::PWM_REGISTER_COUNT;

/// The driver's copy of the MAX7314 registers it writes.
///
/// These hold what was last written to the chip, starting from the power-up
/// values (all ones). They are never read back from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShadowRegisters {
    /// Port configuration, pins 0-7 then 8-15. 1 = input.
    configs: [u8; 2],
    /// Static output levels, pins 0-7 then 8-15.
    static_outputs: [u8; 2],
    /// Output intensity registers, two 4-bit codes each.
    pwm_outputs: [u8; PWM_REGISTER_COUNT],
}

impl Default for ShadowRegisters {
    fn default() -> Self {
        Self::POWER_UP
    }
}

impl ShadowRegisters {
    /// Register contents after the MAX7314 powers up: every pin an input, every
    /// output released, every intensity code 0xF.
    pub const POWER_UP: Self = Self {
        configs: [0xFF; 2],
        static_outputs: [0xFF; 2],
        pwm_outputs: [0xFF; PWM_REGISTER_COUNT],
    };

    /// Direction bitfield, bit set = input.
    pub fn direction(&self) -> u16 {
        u16::from_le_bytes(self.configs)
    }

    /// Direction of a single pin, or `None` if `pin` is not in 0..=15.
    pub fn pin_direction(&self, pin: u8) -> Option<PinDirection> {
        let mask = gpio::mask(pin)?;
        Some((self.direction() & mask != 0).into())
    }

    /// Static output bitfield, bit set = high (released).
    pub fn static_outputs(&self) -> u16 {
        u16::from_le_bytes(self.static_outputs)
    }

    /// Static output level of a single pin, or `None` if `pin` is not in 0..=15.
    pub fn static_level(&self, pin: u8) -> Option<LogicLevel> {
        let mask = gpio::mask(pin)?;
        Some((self.static_outputs() & mask != 0).into())
    }

    /// Raw output intensity registers.
    pub fn pwm_outputs(&self) -> [u8; PWM_REGISTER_COUNT] {
        self.pwm_outputs
    }

    /// 4-bit intensity code of a single pin, or `None` if `pin` is not in 0..=15.
    pub fn pwm_code(&self, pin: u8) -> Option<u8> {
        gpio::mask(pin)?;
        let slot = Slot::for_pin(pin);
        Some(self.pwm_outputs[slot.register_index].get_bits(slot.shift..slot.shift + 4))
    }

    pub(crate) fn config_bytes(&self) -> [u8; 2] {
        self.configs
    }

    pub(crate) fn static_output_bytes(&self) -> [u8; 2] {
        self.static_outputs
    }

    pub(crate) fn replace_direction(&mut self, bitfield: u16) {
        self.configs = bitfield.to_le_bytes();
    }

    pub(crate) fn set_static_outputs(&mut self, bitfield: u16) {
        let [low, high] = bitfield.to_le_bytes();
        self.static_outputs[0] |= low;
        self.static_outputs[1] |= high;
    }

    pub(crate) fn clear_static_outputs(&mut self, bitfield: u16) {
        let [low, high] = bitfield.to_le_bytes();
        self.static_outputs[0] &= !low;
        self.static_outputs[1] &= !high;
    }

    /// Store a 4-bit code in the pin's slot and return the updated register index
    /// and value.
    pub(crate) fn set_pwm_code(&mut self, pin: u8, code: u8) -> (usize, u8) {
        let slot = Slot::for_pin(pin);
        let register = &mut self.pwm_outputs[slot.register_index];
        register.set_bits(slot.shift..slot.shift + 4, code);
        (slot.register_index, *register)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_up_is_all_ones() {
        let shadow = ShadowRegisters::default();
        assert_eq!(shadow.direction(), 0xFFFF);
        assert_eq!(shadow.static_outputs(), 0xFFFF);
        assert_eq!(shadow.pwm_outputs(), [0xFF; 8]);
        assert_eq!(shadow.pin_direction(9), Some(PinDirection::Input));
    }

    #[test]
    fn direction_replaces_both_bytes() {
        let mut shadow = ShadowRegisters::default();
        shadow.replace_direction(0x12F0);
        assert_eq!(shadow.config_bytes(), [0xF0, 0x12]);
        assert_eq!(shadow.direction(), 0x12F0);
        assert_eq!(shadow.pin_direction(0), Some(PinDirection::Output));
        assert_eq!(shadow.pin_direction(4), Some(PinDirection::Input));
    }

    #[test]
    fn set_then_clear_restores_static_outputs() {
        let mut shadow = ShadowRegisters::default();
        shadow.clear_static_outputs(0x8421);
        let before = shadow;
        shadow.set_static_outputs(0x0001);
        shadow.clear_static_outputs(0x0001);
        assert_eq!(shadow, before);
        assert_eq!(shadow.static_output_bytes(), [0xDE, 0x7B]);
    }

    #[test]
    fn pwm_code_touches_only_its_nibble() {
        for pin in 0..16u8 {
            for code in 0..=0xEu8 {
                let mut shadow = ShadowRegisters::default();
                let (index, value) = shadow.set_pwm_code(pin, code);
                assert_eq!(index, (pin / 2) as usize);
                assert_eq!(shadow.pwm_code(pin), Some(code));
                assert_eq!(shadow.pwm_outputs()[index], value);
                for other in (0..16u8).filter(|&p| p != pin) {
                    assert_eq!(shadow.pwm_code(other), Some(0xF));
                }
            }
        }
    }

    #[test]
    fn odd_pin_is_high_nibble() {
        let mut shadow = ShadowRegisters::default();
        assert_eq!(shadow.set_pwm_code(3, 0x2), (1, 0x2F));
        assert_eq!(shadow.set_pwm_code(2, 0x7), (1, 0x27));
    }

    #[test]
    fn out_of_range_pin_has_no_state() {
        let mut shadow = ShadowRegisters::default();
        shadow.clear_static_outputs(0x8000);
        assert_eq!(shadow.static_level(15), Some(LogicLevel::Low));
        for pin in [16, 200, 255] {
            assert_eq!(shadow.pin_direction(pin), None);
            assert_eq!(shadow.static_level(pin), None);
            assert_eq!(shadow.pwm_code(pin), None);
        }
    }
}
