//! SPI interface tests: byte-level bus and GPIO behaviour.
//!
//! Run with: cargo test --test interface

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use embedded_hal_mock::eh1::MockError;
use ssd16xx::{
    Builder, DisplayError, DisplayInterface, Interface, Lifecycle, PowerState, Ssd16xx,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the three SPI expectations that correspond to one `spi.write(&data)` call
/// via the `SpiDevice` trait.
fn spi_device_write(data: &[u8]) -> [SpiTransaction<u8>; 3] {
    [
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(data.to_vec()),
        SpiTransaction::transaction_end(),
    ]
}

/// Create an idle pin mock that expects no transactions.
fn idle_pin() -> PinMock {
    PinMock::new(&[])
}

/// Expected bus traffic, accumulated command by command
#[derive(Default)]
struct Expectations {
    spi: Vec<SpiTransaction<u8>>,
    dc: Vec<PinTransaction>,
}

impl Expectations {
    fn command(&mut self, command: u8, data: &[u8]) {
        self.dc.push(PinTransaction::set(PinState::Low));
        self.spi.extend(spi_device_write(&[command]));
        if !data.is_empty() {
            self.dc.push(PinTransaction::set(PinState::High));
            self.spi.extend(spi_device_write(data));
        }
    }
}

// ---------------------------------------------------------------------------
// Test: command and data framing
// ---------------------------------------------------------------------------

/// Commands go out with DC low, their parameters with DC high.
#[test]
fn test_cmd_with_data_toggles_dc() {
    let mut expected = Expectations::default();
    expected.command(0x11, &[0x02]);
    expected.command(0x20, &[]);

    let mut spi = SpiMock::new(&expected.spi);
    let mut dc = PinMock::new(&expected.dc);
    let mut rst = idle_pin();
    let mut busy = idle_pin();

    let mut interface =
        DisplayInterface::new(spi.clone(), busy.clone(), dc.clone(), rst.clone(), NoopDelay);
    interface.cmd_with_data(0x11, &[0x02]).unwrap();
    interface.cmd(0x20).unwrap();

    spi.done();
    dc.done();
    rst.done();
    busy.done();
}

// ---------------------------------------------------------------------------
// Test: busy line and reset pulse
// ---------------------------------------------------------------------------

/// The busy line is polled until it reads low.
#[test]
fn test_wait_busy_low_polls_until_idle() {
    let busy_expectations = [
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::High),
        PinTransaction::get(PinState::Low),
    ];

    let mut spi = SpiMock::<u8>::new(&[]);
    let mut dc = idle_pin();
    let mut rst = idle_pin();
    let mut busy = PinMock::new(&busy_expectations);

    let mut interface =
        DisplayInterface::new(spi.clone(), busy.clone(), dc.clone(), rst.clone(), NoopDelay);
    interface.wait_busy_low();

    spi.done();
    dc.done();
    rst.done();
    busy.done();
}

/// Reset is asserted low and released high.
#[test]
fn test_reset_pulse() {
    let rst_expectations = [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ];

    let mut spi = SpiMock::<u8>::new(&[]);
    let mut dc = idle_pin();
    let mut rst = PinMock::new(&rst_expectations);
    let mut busy = idle_pin();

    let mut interface =
        DisplayInterface::new(spi.clone(), busy.clone(), dc.clone(), rst.clone(), NoopDelay);
    interface.reset_pulse().unwrap();

    spi.done();
    dc.done();
    rst.done();
    busy.done();
}

// ---------------------------------------------------------------------------
// Test: panel power switch
// ---------------------------------------------------------------------------

/// Power up drives CS and RST low before energising the panel; power down
/// removes the supply first and then drives every control line low.
#[test]
fn test_power_switch_ordering() {
    let cs_expectations = [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::Low),
    ];
    let rst_expectations = [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::Low),
    ];
    let pwr_expectations = [
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ];
    let dc_expectations = [PinTransaction::set(PinState::Low)];

    let mut spi = SpiMock::<u8>::new(&[]);
    let mut dc = PinMock::new(&dc_expectations);
    let mut rst = PinMock::new(&rst_expectations);
    let mut busy = idle_pin();
    let mut pwr = PinMock::new(&pwr_expectations);
    let mut cs = PinMock::new(&cs_expectations);

    let mut interface =
        DisplayInterface::new(spi.clone(), busy.clone(), dc.clone(), rst.clone(), NoopDelay)
            .with_power_switch(pwr.clone(), cs.clone());
    assert!(interface.has_power_switch());
    interface.power_up().unwrap();
    interface.power_down().unwrap();

    spi.done();
    dc.done();
    rst.done();
    busy.done();
    pwr.done();
    cs.done();
}

/// A PWR pin that cannot be driven aborts power up after CS and RST.
#[test]
fn test_power_pin_failure_is_reported() {
    let cs_expectations = [PinTransaction::set(PinState::Low)];
    let rst_expectations = [PinTransaction::set(PinState::Low)];
    let pwr_expectations = [PinTransaction::set(PinState::High)
        .with_error(MockError::Io(std::io::ErrorKind::NotConnected))];

    let mut spi = SpiMock::<u8>::new(&[]);
    let mut dc = idle_pin();
    let mut rst = PinMock::new(&rst_expectations);
    let mut busy = idle_pin();
    let mut pwr = PinMock::new(&pwr_expectations);
    let mut cs = PinMock::new(&cs_expectations);

    let mut interface =
        DisplayInterface::new(spi.clone(), busy.clone(), dc.clone(), rst.clone(), NoopDelay)
            .with_power_switch(pwr.clone(), cs.clone());
    assert!(matches!(
        interface.power_up(),
        Err(DisplayError::BusWriteError)
    ));

    spi.done();
    dc.done();
    rst.done();
    busy.done();
    pwr.done();
    cs.done();
}

/// Without a power switch the power hooks touch no pins.
#[test]
fn test_no_power_switch_is_silent() {
    let mut spi = SpiMock::<u8>::new(&[]);
    let mut dc = idle_pin();
    let mut rst = idle_pin();
    let mut busy = idle_pin();

    let mut interface =
        DisplayInterface::new(spi.clone(), busy.clone(), dc.clone(), rst.clone(), NoopDelay);
    assert!(!interface.has_power_switch());
    interface.power_up().unwrap();
    interface.power_down().unwrap();

    spi.done();
    dc.done();
    rst.done();
    busy.done();
}

// ---------------------------------------------------------------------------
// Test: driver bring-up and deep sleep over SPI
// ---------------------------------------------------------------------------

/// An 8x8 panel: bring-up resets the controller and clears both RAM banks,
/// power off sends the deep sleep command.
#[test]
fn test_driver_bring_up_and_sleep() {
    let config = Builder::new()
        .dimensions(8, 8)
        .driving_voltages(&[0x19], &[0x02])
        .build()
        .unwrap();

    let mut expected = Expectations::default();
    expected.command(0x12, &[]);
    for ram in [0x24, 0x26] {
        expected.command(0x11, &[0x01]);
        expected.command(0x44, &[0x00, 0x00]);
        expected.command(0x45, &[0x07, 0x00, 0x00, 0x00]);
        expected.command(0x4E, &[0x00]);
        expected.command(0x4F, &[0x07, 0x00]);
        expected.command(ram, &[0xFF; 8]);
    }
    expected.command(0x10, &[0x01]);

    let rst_expectations = [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ];
    let busy_expectations = [
        PinTransaction::get(PinState::Low),
        PinTransaction::get(PinState::Low),
        PinTransaction::get(PinState::Low),
    ];

    let mut spi = SpiMock::new(&expected.spi);
    let mut dc = PinMock::new(&expected.dc);
    let mut rst = PinMock::new(&rst_expectations);
    let mut busy = PinMock::new(&busy_expectations);

    let interface =
        DisplayInterface::new(spi.clone(), busy.clone(), dc.clone(), rst.clone(), NoopDelay);
    let mut epd = Ssd16xx::new(interface, config).expect("bring-up must succeed");
    assert_eq!(epd.power_state(), PowerState::Active);
    epd.set_power_state(PowerState::Off)
        .expect("power off must succeed");
    assert_eq!(epd.power_state(), PowerState::Off);

    spi.done();
    dc.done();
    rst.done();
    busy.done();
}
