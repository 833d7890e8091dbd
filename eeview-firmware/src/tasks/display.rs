//! Display task
//!
//! Shows the banner, then renders the two EEPROM pages for every position
//! the encoder task sends.

use defmt::*;
use eeview_core::viewer::{PageViewer, RefreshReport, BANNER_HOLD_MS};
use eeview_drivers::{I2cEeprom, St7066u};
use eeview_hal::{Pin, PinGroup};
use eeview_hal_stm32f4::Mmio;
use embassy_stm32::i2c::{I2c, Master};
use embassy_stm32::mode::Blocking;
use embassy_time::{Delay, Timer};

use crate::channels::POSITION_QUEUE;

pub type Eeprom = I2cEeprom<I2c<'static, Blocking, Master>>;
pub type Lcd = St7066u<Pin<'static, Mmio>, Pin<'static, Mmio>, PinGroup<'static, Mmio>, Delay>;
pub type Viewer = PageViewer<Eeprom, Lcd>;

#[embassy_executor::task]
pub async fn display_task(mut viewer: Viewer) {
    info!("Display task started");

    let report = viewer.boot(Timer::after_millis(BANNER_HOLD_MS)).await;
    log_report(&mut viewer, &report);

    loop {
        let (event, report) = viewer.update(&POSITION_QUEUE).await;
        debug!("Showing position {} at offset {=u16:#x}", event.position, report.offset);
        log_report(&mut viewer, &report);
    }
}

fn log_report(viewer: &mut Viewer, report: &RefreshReport) {
    if report.is_ok() {
        return;
    }
    for fault in report.faults() {
        error!("EEPROM page at {=u16:#x}: {}", report.offset, fault);
    }
    if let Some(kind) = viewer.storage_mut().take_error() {
        error!("I2C: {}", kind);
    }
}
