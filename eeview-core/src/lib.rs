//! Board-agnostic core logic for the EEPROM viewer firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Pin roles and the board pin table
//! - Interrupt-to-task event queue
//! - Edge interrupt service logic
//! - Status LED blink patterns
//! - Encoder forwarding stage
//! - EEPROM page viewer
//! - Collaborator traits (storage, character display, encoder)

#![no_std]
#![deny(unsafe_code)]

pub mod blink;
pub mod isr;
pub mod pins;
pub mod pipeline;
pub mod queue;
pub mod traits;
pub mod viewer;

#[cfg(test)]
mod mock;

pub use isr::{EdgeHandler, EdgeOutcome, RawInputEvent};
pub use queue::{EventQueue, EventSink, QueueFull};
