//! NVIC adapter for EXTI vectors

use eeview_hal::{IrqController, Priority, Vector};
use embassy_stm32::interrupt::{self, Interrupt, InterruptExt};

/// Interrupt controller backed by the Cortex-M NVIC
///
/// STM32F4 implements 4 priority bits in the upper nibble of each
/// priority byte.
#[derive(Debug, Default)]
pub struct Nvic {
    _private: (),
}

impl Nvic {
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

const fn interrupt_for(vector: Vector) -> Interrupt {
    match vector {
        Vector::Exti0 => Interrupt::EXTI0,
        Vector::Exti1 => Interrupt::EXTI1,
        Vector::Exti2 => Interrupt::EXTI2,
        Vector::Exti3 => Interrupt::EXTI3,
        Vector::Exti4 => Interrupt::EXTI4,
        Vector::Exti9_5 => Interrupt::EXTI9_5,
        Vector::Exti15_10 => Interrupt::EXTI15_10,
    }
}

impl IrqController for Nvic {
    fn set_priority(&mut self, vector: Vector, priority: Priority) {
        interrupt_for(vector).set_priority(interrupt::Priority::from(priority.level() << 4));
    }

    fn enable(&mut self, vector: Vector) {
        interrupt_for(vector).unpend();
        // SAFETY: handlers for every EXTI vector are defined by the firmware
        unsafe { interrupt_for(vector).enable() };
    }
}
