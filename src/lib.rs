#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
mod driver;
mod error;
pub mod gpio;
pub mod interrupt;
pub mod pwm;
pub mod registers;
mod shadow;

pub use config::{Config, EXPANDER_1_ADDRESS, EXPANDER_2_ADDRESS};
pub use driver::Max7314;
pub use error::Error;
pub use shadow::ShadowRegisters;
