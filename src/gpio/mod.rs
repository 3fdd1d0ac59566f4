//! Pin bitfields, pin levels and directions, and the per-pin `embedded-hal` types.
//!
//! Bulk operations on [`Max7314`] take a `u16` bitfield where bit `n` stands for
//! pin `n`. The `PIN*` constants can be OR-ed together to build one.
//!
//! [`Max7314`]: crate::Max7314

mod common;
mod pins;

pub use common::{LogicLevel, PinDirection};
pub use pins::{ExpanderPin, Input, Output, Pins};

/// Number of GPIO pins on the MAX7314.
pub const PIN_COUNT: u8 = 16;

/// Bitfield with no pins set.
pub const NO_PINS: u16 = 0x0000;
/// Bitfield with every pin set.
pub const ALL_PINS: u16 = 0xFFFF;

/// Pin 0.
pub const PIN0: u16 = 1 << 0;
/// Pin 1.
pub const PIN1: u16 = 1 << 1;
/// Pin 2.
pub const PIN2: u16 = 1 << 2;
/// Pin 3.
pub const PIN3: u16 = 1 << 3;
/// Pin 4.
pub const PIN4: u16 = 1 << 4;
/// Pin 5.
pub const PIN5: u16 = 1 << 5;
/// Pin 6.
pub const PIN6: u16 = 1 << 6;
/// Pin 7.
pub const PIN7: u16 = 1 << 7;
/// Pin 8.
pub const PIN8: u16 = 1 << 8;
/// Pin 9.
pub const PIN9: u16 = 1 << 9;
/// Pin 10.
pub const PIN10: u16 = 1 << 10;
/// Pin 11.
pub const PIN11: u16 = 1 << 11;
/// Pin 12.
pub const PIN12: u16 = 1 << 12;
/// Pin 13.
pub const PIN13: u16 = 1 << 13;
/// Pin 14.
pub const PIN14: u16 = 1 << 14;
/// Pin 15.
pub const PIN15: u16 = 1 << 15;

/// Bitfield for a single pin, or `None` if `pin` is not in 0..=15.
pub const fn mask(pin: u8) -> Option<u16> {
    if pin < PIN_COUNT {
        Some(1 << pin)
    } else {
        None
    }
}
