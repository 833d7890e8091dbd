//! Board definition: WeAct "blackpill" STM32F411CEU6
//!
//! One row per pin role. The table is checked at compile time: a duplicated
//! pin or role, or two interrupt sources on the same EXTI line, fails the
//! build.

use eeview_core::blink::Level;
use eeview_core::pins::{PinAssignment, PinMap, PinRole};
use eeview_hal::gpio::{Pull, Speed};
use eeview_hal::{check_lines, Edge, PinConfig, PinId, Port, Priority};

/// On-board blue LED, wired to VCC (lit when driven low)
pub const STATUS_LED: PinId = PinId::new(Port::C, 13);
const STATUS_LED_ACTIVE_LOW: bool = true;

pub const ENCODER_A: PinId = PinId::new(Port::B, 0);
pub const ENCODER_B: PinId = PinId::new(Port::B, 1);
pub const ENCODER_SWITCH: PinId = PinId::new(Port::B, 2);

pub const I2C_SCL: PinId = PinId::new(Port::B, 6);
pub const I2C_SDA: PinId = PinId::new(Port::B, 7);

pub const LCD_RS: PinId = PinId::new(Port::B, 8);
pub const LCD_EN: PinId = PinId::new(Port::B, 9);
/// LCD D0-D7 on PA0-PA7
pub const LCD_DATA_PORT: Port = Port::A;
pub const LCD_DATA_FIRST: u8 = 0;
pub const LCD_DATA_WIDTH: u8 = 8;

/// Encoder and switch edges; level 11 of 16, below the time driver
pub const EXTI_PRIORITY: Priority = Priority::new(11);

/// Raw edge snapshots waiting for the encoder task
pub const INPUT_QUEUE_CAPACITY: usize = 8;
/// Decoded positions waiting for the display task
pub const POSITION_QUEUE_CAPACITY: usize = 8;

const ENCODER_INPUT: PinConfig = PinConfig::input(Pull::None);
const I2C_PIN: PinConfig = PinConfig::alternate(4).open_drain().with_speed(Speed::High);
const LCD_PIN: PinConfig = PinConfig::output();
const PARKED: PinConfig = PinConfig::input(Pull::None);

const fn lcd_data(bit: u8) -> PinAssignment {
    PinAssignment::new(
        PinRole::LcdData(bit),
        PinId::new(LCD_DATA_PORT, LCD_DATA_FIRST + bit),
        LCD_PIN,
    )
}

pub const PIN_TABLE: [PinAssignment; 19] = [
    // JTDI, JTDO, NJTRST: free them for general use
    PinAssignment::new(PinRole::Released, PinId::new(Port::A, 15), PARKED),
    PinAssignment::new(PinRole::Released, PinId::new(Port::B, 3), PARKED),
    PinAssignment::new(PinRole::Released, PinId::new(Port::B, 4), PARKED),
    PinAssignment::new(PinRole::StatusLed, STATUS_LED, PinConfig::output()),
    PinAssignment::new(PinRole::I2cScl, I2C_SCL, I2C_PIN),
    PinAssignment::new(PinRole::I2cSda, I2C_SDA, I2C_PIN),
    PinAssignment::new(PinRole::EncoderA, ENCODER_A, ENCODER_INPUT.with_pull(Pull::Down))
        .with_interrupt(Edge::Both, EXTI_PRIORITY),
    PinAssignment::new(PinRole::EncoderB, ENCODER_B, ENCODER_INPUT)
        .with_interrupt(Edge::Both, EXTI_PRIORITY),
    PinAssignment::new(PinRole::EncoderSwitch, ENCODER_SWITCH, ENCODER_INPUT)
        .with_interrupt(Edge::Both, EXTI_PRIORITY),
    PinAssignment::new(PinRole::LcdRegisterSelect, LCD_RS, LCD_PIN),
    PinAssignment::new(PinRole::LcdEnable, LCD_EN, LCD_PIN),
    lcd_data(0),
    lcd_data(1),
    lcd_data(2),
    lcd_data(3),
    lcd_data(4),
    lcd_data(5),
    lcd_data(6),
    lcd_data(7),
];

pub const PIN_MAP: PinMap<'static> = PinMap::new(&PIN_TABLE);

const INTERRUPT_COUNT: usize = PIN_MAP.interrupt_count();
/// Pins with an EXTI binding, in binding order
pub const INTERRUPT_PINS: [PinId; INTERRUPT_COUNT] = PIN_MAP.interrupt_pins();

const _: () = assert!(PIN_MAP.validate().is_ok(), "invalid pin table");
const _: () = assert!(
    check_lines(&INTERRUPT_PINS).is_ok(),
    "interrupt pins alias to the same EXTI line"
);

/// Pin level that shows `level` on the status LED
pub const fn status_led_high(level: Level) -> bool {
    level.pin_high(STATUS_LED_ACTIVE_LOW)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_led_is_active_low() {
        assert!(!status_led_high(Level::On));
        assert!(status_led_high(Level::Off));
    }

    #[test]
    fn test_interrupt_pins_from_table() {
        assert_eq!(INTERRUPT_PINS, [ENCODER_A, ENCODER_B, ENCODER_SWITCH]);
    }
}
