//! eeview - I2C EEPROM viewer firmware
//!
//! Shows the contents of a 24xx EEPROM on a 16x2 character LCD, two 16-byte
//! pages at a time. A rotary encoder scrolls through the pages and the
//! status LED blinks a heartbeat.
//!
//! Runs on an STM32F411 "blackpill".

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{SpawnError, Spawner};
use embassy_stm32::i2c::I2c;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use eeview_core::viewer::PageViewer;
use eeview_drivers::{I2cEeprom, QuadratureEncoder, St7066u};
use eeview_hal::{Pin, PinGroup};
use eeview_hal_stm32f4::i2c::{eeprom_config, EEPROM_FREQUENCY};
use eeview_hal_stm32f4::Nvic;

use crate::channels::REGS;
use crate::config::board::{
    LCD_DATA_FIRST, LCD_DATA_PORT, LCD_DATA_WIDTH, LCD_EN, LCD_RS, PIN_MAP, STATUS_LED,
};

mod channels;
mod config;
mod diagnostic;
mod isr;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("eeview firmware starting...");

    // Clocks (including every GPIO port and SYSCFG) and the time driver
    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    // Every pin in the table; EXTI stays masked until bind_all
    PIN_MAP.configure_all(&REGS);
    info!("{} pins configured", PIN_MAP.entries().len());

    let i2c = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, eeprom_config());
    info!("I2C1 at {} Hz", EEPROM_FREQUENCY.0);

    let lcd = St7066u::new(
        Pin::new(&REGS, LCD_RS),
        Pin::new(&REGS, LCD_EN),
        PinGroup::new(&REGS, LCD_DATA_PORT, LCD_DATA_FIRST, LCD_DATA_WIDTH),
        Delay,
    );
    let viewer = PageViewer::new(I2cEeprom::new(i2c), lcd);

    // Queues and handlers are static, so edges may arrive from here on
    let mut nvic = Nvic::new();
    for line in PIN_MAP.bind_all(&REGS, &mut nvic) {
        info!("EXTI{} bound ({})", line.line(), line.vector());
    }

    info!("Spawning tasks...");
    start(spawner.spawn(tasks::led_task(Pin::new(&REGS, STATUS_LED))), "led");
    start(spawner.spawn(tasks::encoder_task(QuadratureEncoder::default())), "encoder");
    start(spawner.spawn(tasks::display_task(viewer)), "display");
    info!("All tasks spawned");
}

fn start(result: Result<(), SpawnError>, name: &str) {
    if let Err(e) = result {
        error!("Failed to spawn {} task: {}", name, e);
        diagnostic::halt();
    }
}
