//! STM32F4-specific HAL for the eeview firmware
//!
//! Provides the hardware side of `eeview-hal`:
//!
//! - [`Mmio`] - volatile [`RegisterFile`](eeview_hal::RegisterFile) over
//!   the GPIO, SYSCFG and EXTI blocks
//! - [`Nvic`] - [`IrqController`](eeview_hal::IrqController) for the EXTI
//!   vectors
//! - [`i2c`] - EEPROM bus settings
//!
//! # Features
//!
//! - `stm32f411ce` - blackpill STM32F411CEU6
//! - `defmt` - Enable debug formatting support

#![no_std]

pub mod i2c;
pub mod mmio;
pub mod nvic;

pub use mmio::Mmio;
pub use nvic::Nvic;
