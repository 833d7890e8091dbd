//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in eeview-core:
//!
//! - Quadrature rotary encoder decoder
//! - 24xx I2C EEPROM storage over `embedded-hal`
//! - ST7066U/HD44780 character LCD on an 8-bit parallel bus

#![no_std]
#![deny(unsafe_code)]

pub mod eeprom;
pub mod encoder;
pub mod st7066u;

pub use eeprom::I2cEeprom;
pub use encoder::QuadratureEncoder;
pub use st7066u::{DataBus, St7066u};
