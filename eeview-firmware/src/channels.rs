//! Shared hardware handle and inter-task queues
//!
//! Statics so the EXTI vectors and the tasks can reach them without
//! passing references around.

use eeview_core::traits::PositionEvent;
use eeview_core::{EventQueue, RawInputEvent};
use eeview_hal_stm32f4::Mmio;

use crate::config::board::{INPUT_QUEUE_CAPACITY, POSITION_QUEUE_CAPACITY};

/// GPIO, SYSCFG and EXTI registers
///
/// Pin configuration runs once in `main` before any EXTI vector is
/// unmasked; afterwards only set/reset and pending-clear writes happen.
// SAFETY: the only owner of these register blocks; embassy only touches
// the I2C pins, after they are configured here
pub static REGS: Mmio = unsafe { Mmio::steal() };

/// Edge snapshots from the EXTI vectors to the encoder task
pub static INPUT_QUEUE: EventQueue<RawInputEvent, INPUT_QUEUE_CAPACITY> = EventQueue::new();

/// Decoded positions from the encoder task to the display task
pub static POSITION_QUEUE: EventQueue<PositionEvent, POSITION_QUEUE_CAPACITY> = EventQueue::new();
