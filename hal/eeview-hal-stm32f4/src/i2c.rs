//! I2C bus settings for the EEPROM

use embassy_stm32::i2c::Config;
use embassy_stm32::time::Hertz;

/// Standard mode; 24xx EEPROMs at 3.3 V are rated for it
pub const EEPROM_FREQUENCY: Hertz = Hertz(100_000);

/// Bus configuration for the EEPROM
///
/// The board has external pull-ups on SCL/SDA.
pub fn eeprom_config() -> Config {
    let mut config = Config::default();
    config.frequency = EEPROM_FREQUENCY;
    config
}
