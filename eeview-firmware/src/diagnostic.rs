//! Last-resort failure indication
//!
//! Blinks the status LED rapidly forever without the executor or timers,
//! so it also works from the HardFault handler.

use cortex_m_rt::{exception, ExceptionFrame};
use defmt::*;
use eeview_core::blink::{Blinker, DIAGNOSTIC};
use eeview_hal::{OutputPin, Pin};

use crate::channels::REGS;
use crate::config::board::{status_led_high, STATUS_LED};

/// Core clock as left by `embassy_stm32::init` with the default config (HSI)
const CORE_CLOCK_HZ: u32 = 16_000_000;

/// Stop everything and blink the diagnostic pattern
pub fn halt() -> ! {
    cortex_m::interrupt::disable();

    let mut led = Pin::new(&REGS, STATUS_LED);
    let mut blinker = Blinker::with_pattern(DIAGNOSTIC);
    loop {
        let step = blinker.next_step();
        led.set_state(status_led_high(step.level));
        cortex_m::asm::delay(step.duration_ms * (CORE_CLOCK_HZ / 1000));
    }
}

#[exception]
unsafe fn HardFault(frame: &ExceptionFrame) -> ! {
    error!("HardFault at pc={=u32:#x}", frame.pc());
    halt()
}
