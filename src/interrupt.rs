//! Wiring of the MAX7314 interrupt output.
//!
//! The INT output is open-drain and active low. It goes low when an input changes
//! and stays low, suppressing further interrupts, until the input ports are read
//! with [`Max7314::read_pins`] (or [`Max7314::try_read_pins`]). Reading is the only
//! way to acknowledge an interrupt.
//!
//! The driver never calls the interrupt callback itself. It hands the callback to
//! an [`InterruptRegistrar`] once, during [`Max7314::init_with_interrupt`], and the
//! platform calls it from interrupt context on each falling edge. Do the read from
//! normal context, not from the callback.
//!
//! [`Max7314::read_pins`]: crate::Max7314::read_pins
//! [`Max7314::try_read_pins`]: crate::Max7314::try_read_pins
//! [`Max7314::init_with_interrupt`]: crate::Max7314::init_with_interrupt

/// Platform hook for attaching a handler to a host GPIO edge.
pub trait InterruptRegistrar {
    /// Arrange for `callback` to run on each falling edge of host GPIO `pin`.
    fn register_falling_edge(&mut self, pin: u8, callback: fn());
}

impl<F: FnMut(u8, fn())> InterruptRegistrar for F {
    fn register_falling_edge(&mut self, pin: u8, callback: fn()) {
        self(pin, callback)
    }
}
