//! 24xx-series I2C EEPROM
//!
//! Small 24xx parts (24LC04 and similar) take a one-byte word address and
//! use the low bits of the bus address as block select. Addressing is the
//! caller's job; this driver only moves bytes and reports how many moved.

use eeview_core::traits::Storage;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// EEPROM on an `embedded-hal` I2C bus
///
/// `embedded-hal` transfers either complete or fail as a whole, so a
/// failed transfer counts as zero bytes. The bus error is kept for logging
/// until [`take_error`](Self::take_error) is called.
pub struct I2cEeprom<I> {
    i2c: I,
    last_error: Option<ErrorKind>,
}

impl<I: I2c> I2cEeprom<I> {
    pub fn new(i2c: I) -> Self {
        Self {
            i2c,
            last_error: None,
        }
    }

    /// Most recent bus error, if any, clearing it
    pub fn take_error(&mut self) -> Option<ErrorKind> {
        self.last_error.take()
    }

    fn count<E: embedded_hal::i2c::Error>(&mut self, result: Result<(), E>, len: usize) -> usize {
        match result {
            Ok(()) => len,
            Err(e) => {
                self.last_error = Some(e.kind());
                0
            }
        }
    }
}

impl<I: I2c> Storage for I2cEeprom<I> {
    fn write(&mut self, address: u8, bytes: &[u8]) -> usize {
        let result = self.i2c.write(address, bytes);
        self.count(result, bytes.len())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> usize {
        let result = self.i2c.read(address, buf);
        self.count(result, buf.len())
    }
}
