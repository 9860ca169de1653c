//! I2C transport
//!
//! SSD1306-style framing over an `embedded-hal` I2C master: every transfer
//! starts with a control byte that selects the command or data register.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, Operation};

use crate::transport::Transport;

/// Control byte: following byte is a command
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte: following bytes go to display memory
const CONTROL_DATA: u8 = 0x40;

/// I2C transport configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// 7-bit device address
    pub address: u8,
    /// Time the controller needs after power-up before accepting commands
    pub power_up_delay_ms: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::PRIMARY
    }
}

impl I2cConfig {
    /// SA0 pulled low (0x3C)
    pub const PRIMARY: Self = Self {
        address: 0x3C,
        power_up_delay_ms: 100,
    };

    /// SA0 pulled high (0x3D)
    pub const SECONDARY: Self = Self {
        address: 0x3D,
        power_up_delay_ms: 100,
    };
}

/// Blocking I2C transport
pub struct I2cTransport<I2C, D> {
    i2c: I2C,
    delay: D,
    config: I2cConfig,
}

impl<I2C, D> I2cTransport<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a transport on the given bus
    pub fn new(i2c: I2C, delay: D, config: I2cConfig) -> Self {
        Self { i2c, delay, config }
    }

    /// Give the bus and delay back
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D> Transport for I2cTransport<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn reset(&mut self) -> Result<(), Self::Error> {
        // Nothing to toggle on I2C modules, only wait for the charge pump
        self.delay.delay_ms(self.config.power_up_delay_ms);
        Ok(())
    }

    fn write_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.config.address, &[CONTROL_COMMAND, cmd])
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }

        // Adjacent writes in one transaction share a single START
        self.i2c.transaction(
            self.config.address,
            &mut [Operation::Write(&[CONTROL_DATA]), Operation::Write(data)],
        )
    }
}
