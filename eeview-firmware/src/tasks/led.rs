//! Status LED heartbeat

use defmt::*;
use eeview_core::blink::Blinker;
use eeview_hal::{OutputPin, Pin};
use eeview_hal_stm32f4::Mmio;
use embassy_time::Timer;

use crate::config::board::status_led_high;

/// Blink the heartbeat pattern forever
#[embassy_executor::task]
pub async fn led_task(mut led: Pin<'static, Mmio>) {
    info!("LED task started");

    let mut blinker = Blinker::new();
    loop {
        let step = blinker.next_step();
        led.set_state(status_led_high(step.level));
        Timer::after_millis(u64::from(step.duration_ms)).await;
    }
}
