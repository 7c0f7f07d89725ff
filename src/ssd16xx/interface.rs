//! Display interface using SPI
//!
//! [`Interface`] is the transport the driver talks through: command and data
//! bytes, the busy line, the reset line and an optional panel power switch.
//! [`DisplayInterface`] implements it over an embedded-hal [`SpiDevice`] and
//! GPIO pins.
use core::convert::Infallible;

use display_interface::DisplayError;
use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, InputPin, OutputPin},
    spi::SpiDevice,
};

const RESET_DELAY_MS: u32 = 1;
/// Interval between busy line samples
pub const BUSY_POLL_MS: u32 = 1;

/// Transport between the driver and an SSD16xx controller
pub trait Interface {
    /// Send a command byte with no parameters
    fn cmd(&mut self, command: u8) -> Result<(), DisplayError>;

    /// Send a command byte followed by its parameter bytes
    fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError>;

    /// Sample the busy line. A line that cannot be read counts as not busy.
    fn is_busy(&mut self) -> bool;

    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Pulse the reset line
    fn reset_pulse(&mut self) -> Result<(), DisplayError>;

    /// Whether panel power can be switched off
    fn has_power_switch(&self) -> bool;

    /// Energise the panel supply
    fn power_up(&mut self) -> Result<(), DisplayError>;

    /// Remove the panel supply and drive every control line low
    fn power_down(&mut self) -> Result<(), DisplayError>;

    /// Wait for the busy line to go low.
    ///
    /// There is no timeout: a controller that never releases the line
    /// blocks forever.
    fn wait_busy_low(&mut self) {
        while self.is_busy() {
            self.delay_ms(BUSY_POLL_MS);
        }
    }
}

/// Placeholder for an absent optional pin
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Pins that exist only on boards with a switchable panel supply
struct PowerLines<PWR, CS> {
    /// High to energise the panel
    pwr: PWR,
    /// Chip select, driven low with the supply so the controller is not back-powered
    cs: CS,
}

/// SPI connection to the controller
pub struct DisplayInterface<SPI, BSY, DC, RST, DELAY, PWR = NoPin, CS = NoPin> {
    /// SPI device
    spi: SPI,
    /// High while the controller is busy
    busy: BSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
    delay: DELAY,
    power: Option<PowerLines<PWR, CS>>,
}

impl<SPI, BSY, DC, RST, DELAY> DisplayInterface<SPI, BSY, DC, RST, DELAY> {
    /// Create an interface without a panel power switch
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, delay: DELAY) -> Self {
        DisplayInterface {
            spi,
            busy,
            dc,
            rst,
            delay,
            power: None,
        }
    }

    /// Attach a panel power switch and the chip select line it shares a
    /// supply with
    pub fn with_power_switch<PWR, CS>(
        self,
        pwr: PWR,
        cs: CS,
    ) -> DisplayInterface<SPI, BSY, DC, RST, DELAY, PWR, CS> {
        DisplayInterface {
            spi: self.spi,
            busy: self.busy,
            dc: self.dc,
            rst: self.rst,
            delay: self.delay,
            power: Some(PowerLines { pwr, cs }),
        }
    }
}

impl<SPI, BSY, DC, RST, DELAY, PWR, CS> DisplayInterface<SPI, BSY, DC, RST, DELAY, PWR, CS> {
    /// Give back the owned peripherals
    pub fn release(self) -> (SPI, BSY, DC, RST, DELAY) {
        (self.spi, self.busy, self.dc, self.rst, self.delay)
    }
}

impl<SPI, BSY, DC, RST, DELAY, PWR, CS> DisplayInterface<SPI, BSY, DC, RST, DELAY, PWR, CS>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Basic function for sending an array of u8-values of data over spi
    fn data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(data)
            .map_err(|_| DisplayError::BusWriteError)
    }
}

impl<SPI, BSY, DC, RST, DELAY, PWR, CS> Interface
    for DisplayInterface<SPI, BSY, DC, RST, DELAY, PWR, CS>
where
    SPI: SpiDevice,
    BSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
    PWR: OutputPin,
    CS: OutputPin,
{
    fn cmd(&mut self, command: u8) -> Result<(), DisplayError> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(&[command]) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
                Err(DisplayError::BusWriteError)
            }
        }
    }

    fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cmd(command)?;
        if data.is_empty() {
            return Ok(());
        }
        self.data(data)
    }

    fn is_busy(&mut self) -> bool {
        match self.busy.is_high() {
            Ok(busy) => busy,
            Err(_) => {
                log::error!("Error reading BUSY pin state - assuming not busy to continue");
                false
            }
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    fn reset_pulse(&mut self) -> Result<(), DisplayError> {
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(RESET_DELAY_MS);
        Ok(())
    }

    fn has_power_switch(&self) -> bool {
        self.power.is_some()
    }

    fn power_up(&mut self) -> Result<(), DisplayError> {
        let Some(power) = self.power.as_mut() else {
            return Ok(());
        };
        power.cs.set_low().map_err(|_| DisplayError::CSError)?;
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        power.pwr.set_high().map_err(|_| {
            log::error!("Error driving PWR pin high - panel supply not switched on");
            DisplayError::BusWriteError
        })
    }

    fn power_down(&mut self) -> Result<(), DisplayError> {
        let Some(power) = self.power.as_mut() else {
            return Ok(());
        };
        power.pwr.set_low().map_err(|_| {
            log::error!("Error driving PWR pin low - panel supply not switched off");
            DisplayError::BusWriteError
        })?;
        power.cs.set_low().map_err(|_| DisplayError::CSError)?;
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.dc.set_low().map_err(|_| DisplayError::DCError)
    }
}
