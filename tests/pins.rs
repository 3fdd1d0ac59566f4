//! Per-pin `embedded-hal` types and interrupt registration.
use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};
use embedded_hal::i2c::ErrorKind;
use embedded_hal::pwm::SetDutyCycle;
use embedded_hal_mock::eh1::i2c::{Mock, Transaction};

use max7314_hal::gpio::{LogicLevel, PinDirection};
use max7314_hal::pwm::DutyCycle;
use max7314_hal::{EXPANDER_1_ADDRESS, Error, Max7314};

const ADDRESS: u8 = EXPANDER_1_ADDRESS;

fn write(bytes: &[u8]) -> Transaction {
    Transaction::write(ADDRESS, bytes.to_vec())
}

/// The pins can only be taken once.
#[test]
fn pins_taken_once() {
    let expander = Max7314::new(Mock::new(&[]), ADDRESS);
    assert!(expander.take_pins().is_some());
    assert!(expander.take_pins().is_none());
    expander.release().done();
}

/// An output pin drives its static bit and its intensity nibble.
#[test]
fn output_pin_static_and_pwm() -> Result<(), Error<ErrorKind>> {
    let expectations = [
        write(&[0x06, 0xF7, 0xFF]),
        write(&[0x02, 0xFF, 0xFF]),
        write(&[0x02, 0xF7, 0xFF]),
        write(&[0x02, 0xFF, 0xFF]),
        write(&[0x11, 0x3F]),
        write(&[0x02, 0xFF, 0xFF]),
        write(&[0x11, 0x7F]),
    ];
    let expander = Max7314::new(Mock::new(&expectations), ADDRESS);
    let pins = expander.take_pins().expect("first take");

    let mut p3 = pins.p3.configure_as_output()?;
    assert_eq!(expander.shadow().pin_direction(3), Some(PinDirection::Output));

    p3.set_high()?;
    assert!(p3.is_set_high()?);
    p3.set_low()?;
    assert!(p3.is_set_low()?);
    assert_eq!(p3.get_output_level(), LogicLevel::Low);

    assert_eq!(p3.max_duty_cycle(), 16);
    p3.set_duty_cycle(4)?;
    assert_eq!(expander.shadow().pwm_code(3), Some(3));
    p3.set_duty_cycle_percent(50)?;
    assert_eq!(expander.shadow().pwm_code(3), Some(7));

    assert_eq!(p3.set_duty_cycle(17), Err(Error::InvalidDutyCycle(17)));
    assert_eq!(p3.set_duty_cycle(1000), Err(Error::InvalidDutyCycle(1000)));
    assert_eq!(p3.set_duty_cycle(u16::MAX), Err(Error::InvalidDutyCycle(u16::MAX)));

    drop(p3);
    expander.release().done();
    Ok(())
}

/// An input pin reads its bit from both input ports.
#[test]
fn input_pin_reads_level() -> Result<(), Error<ErrorKind>> {
    let expectations = [
        write(&[0x06, 0xFF, 0xFF]),
        write(&[0x00]),
        Transaction::read(ADDRESS, vec![0x00, 0x01]),
        write(&[0x00]),
        Transaction::read(ADDRESS, vec![0xFF, 0xFE]),
    ];
    let expander = Max7314::new(Mock::new(&expectations), ADDRESS);
    let pins = expander.take_pins().expect("first take");

    let mut p8 = pins.p8.configure_as_input()?;
    assert!(p8.is_high()?);
    assert!(p8.is_low()?);
    assert_eq!(p8.destroy().direction(), PinDirection::Input);

    expander.release().done();
    Ok(())
}

/// Switching an output back to an input only sets that pin's direction bit.
#[test]
fn output_back_to_input() -> Result<(), Error<ErrorKind>> {
    let expectations = [
        write(&[0x06, 0xFF, 0xFB]),
        write(&[0x06, 0xFF, 0xDB]),
        write(&[0x06, 0xFF, 0xFB]),
    ];
    let expander = Max7314::new(Mock::new(&expectations), ADDRESS);
    let pins = expander.take_pins().expect("first take");

    let p10 = pins.p10.configure_as_output()?;
    let p13 = pins.p13.configure_as_output()?;
    let p13 = p13.try_into_input()?;
    assert_eq!(expander.shadow().direction(), 0xFBFF);

    drop((p10, p13));
    expander.release().done();
    Ok(())
}

/// The typed duty cycle goes through the same encoding as the raw one.
#[test]
fn output_pin_typed_duty_cycle() -> Result<(), Error<ErrorKind>> {
    let expectations = [
        write(&[0x06, 0xFE, 0xFF]),
        write(&[0x02, 0xFE, 0xFF]),
        write(&[0x10, 0xFF]),
    ];
    let expander = Max7314::new(Mock::new(&expectations), ADDRESS);
    let pins = expander.take_pins().expect("first take");

    let p0 = pins.p0.configure_as_output()?;
    p0.set_pwm(DutyCycle::OFF)?;
    assert_eq!(p0.get_output_level(), LogicLevel::Low);

    drop(p0);
    expander.release().done();
    Ok(())
}

static FIRED: AtomicBool = AtomicBool::new(false);

fn on_input_change() {
    FIRED.store(true, Ordering::SeqCst);
}

/// The callback is handed to the registrar once, for the given host pin.
#[test]
fn init_with_interrupt_registers_callback() -> Result<(), Error<ErrorKind>> {
    let expectations = [write(&[0x0F, 0x08]), write(&[0x0E, 0xFF])];
    let expander = Max7314::new(Mock::new(&expectations), ADDRESS);

    let mut registered = Vec::new();
    let mut registrar = |pin: u8, callback: fn()| registered.push((pin, callback));
    expander.init_with_interrupt(&mut registrar, 21, on_input_change)?;

    assert_eq!(registered.len(), 1);
    let (pin, callback) = registered[0];
    assert_eq!(pin, 21);
    callback();
    assert!(FIRED.load(Ordering::SeqCst));

    expander.release().done();
    Ok(())
}

/// Registration still happens when the init writes fail.
#[test]
fn init_with_interrupt_registers_despite_bus_error() {
    let expectations = [
        write(&[0x0F, 0x08]).with_error(ErrorKind::Other),
        write(&[0x0E, 0xFF]),
    ];
    let expander = Max7314::new(Mock::new(&expectations), ADDRESS);

    let mut calls = 0;
    let mut registrar = |_pin: u8, _callback: fn()| calls += 1;
    let result = expander.init_with_interrupt(&mut registrar, 4, on_input_change);

    assert_eq!(result, Err(Error::Bus(ErrorKind::Other)));
    assert_eq!(calls, 1);
    expander.release().done();
}

#[cfg(feature = "async")]
mod wait_for_input_change {
    use embassy_futures::block_on;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::MockError;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
    use embedded_hal_mock::eh1::i2c::{Mock, Transaction};

    use max7314_hal::{Error, Max7314};

    use super::{ADDRESS, write};

    /// Once INT is low the inputs are read, which releases INT.
    #[test]
    fn reads_inputs_once_line_is_low() -> Result<(), Error<ErrorKind>> {
        let expectations = [write(&[0x00]), Transaction::read(ADDRESS, vec![0x81, 0x40])];
        let expander = Max7314::new(Mock::new(&expectations), ADDRESS);
        let mut line = PinMock::new(&[PinTransaction::wait_for_state(State::Low)]);

        let levels = block_on(expander.wait_for_input_change(&mut line))?;
        assert_eq!(levels, 0x4081);

        line.done();
        expander.release().done();
        Ok(())
    }

    /// A failed wait is reported and the inputs are left unread.
    #[test]
    fn line_error_skips_read() {
        let expander = Max7314::new(Mock::new(&[]), ADDRESS);
        let mut line = PinMock::new(&[PinTransaction::wait_for_state(State::Low)
            .with_error(MockError::Io(std::io::ErrorKind::NotConnected))]);

        let result = block_on(expander.wait_for_input_change(&mut line));
        assert_eq!(
            result,
            Err(Error::InterruptLine(embedded_hal::digital::ErrorKind::Other))
        );

        line.done();
        expander.release().done();
    }

    /// A read failure after the wait comes back as the usual read error.
    #[test]
    fn select_failure_after_wait() {
        let expectations = [write(&[0x00]).with_error(ErrorKind::Other)];
        let expander = Max7314::new(Mock::new(&expectations), ADDRESS);
        let mut line = PinMock::new(&[PinTransaction::wait_for_state(State::Low)]);

        let result = block_on(expander.wait_for_input_change(&mut line));
        assert_eq!(result, Err(Error::Bus(ErrorKind::Other)));

        line.done();
        expander.release().done();
    }
}
