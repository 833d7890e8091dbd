//! eeview Hardware Abstraction Layer
//!
//! This crate defines the register model and the GPIO/EXTI layer built on
//! it. Chip crates provide a [`RegisterFile`] backed by real memory-mapped
//! registers; host tests use the simulated one in [`sim`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  eeview-core / eeview-firmware          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  eeview-hal (this crate)                │
//! │  gpio · exti · regs                     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ eeview-hal-   │       │ sim           │
//! │   stm32f4     │       │ (host tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`regs`] - named registers, masked fields, the [`RegisterFile`] trait
//! - [`gpio`] - pin configuration and per-bit pin primitives
//! - [`exti`] - edge interrupt binding and pending-flag handling

#![no_std]
#![deny(unsafe_code)]

pub mod exti;
pub mod gpio;
pub mod regs;
#[cfg(any(test, feature = "sim"))]
pub mod sim;

// Re-export key types at crate root for convenience
pub use exti::{bind_interrupt, check_lines, BindingConflict, Edge, InterruptLine, IrqController, Priority, Vector};
pub use gpio::{configure_pin, InputPin, OutputPin, Pin, PinConfig, PinGroup, PinId};
pub use regs::{Field, Port, Register, RegisterFile};
