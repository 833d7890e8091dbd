//! ST7066U / HD44780 character LCD, 8-bit parallel bus
//!
//! Write-only wiring (R/W tied low), so the busy flag is never read and
//! every instruction is followed by its worst-case execution time.

use eeview_core::traits::{CharacterDisplay, DisplayControl, EntryMode, FunctionSet};
use eeview_hal::{OutputPin, PinGroup, RegisterFile};
use embedded_hal::delay::DelayNs;

/// Clear display
const CMD_CLEAR: u8 = 0x01;
/// Set DDRAM address (low 7 bits)
const CMD_SET_DDRAM: u8 = 0x80;
/// Function set, 8-bit bus, used for the reset sequence
const CMD_WAKE: u8 = 0x30;

/// Supply rise to first instruction
const POWER_ON_MS: u32 = 40;
/// Most instructions
const EXEC_US: u32 = 50;
/// Clear and return home
const CLEAR_US: u32 = 2000;
/// Enable pulse width (datasheet minimum 460 ns)
const PULSE_US: u32 = 1;

/// Parallel data bus
pub trait DataBus {
    /// Drive all lines of the bus to `value`
    fn write(&mut self, value: u8);
}

impl<R: RegisterFile + ?Sized> DataBus for PinGroup<'_, R> {
    fn write(&mut self, value: u8) {
        PinGroup::write(self, u32::from(value));
    }
}

/// Character LCD on an 8-bit bus
pub struct St7066u<RS, EN, B, D> {
    rs: RS,
    en: EN,
    bus: B,
    delay: D,
}

impl<RS, EN, B, D> St7066u<RS, EN, B, D>
where
    RS: OutputPin,
    EN: OutputPin,
    B: DataBus,
    D: DelayNs,
{
    pub fn new(rs: RS, mut en: EN, bus: B, delay: D) -> Self {
        en.set_low();
        Self { rs, en, bus, delay }
    }

    /// Send an instruction byte
    pub fn command(&mut self, cmd: u8) {
        self.send(false, cmd);
        let wait = if cmd == CMD_CLEAR { CLEAR_US } else { EXEC_US };
        self.delay.delay_us(wait);
    }

    /// Send a character byte
    pub fn data(&mut self, byte: u8) {
        self.send(true, byte);
        self.delay.delay_us(EXEC_US);
    }

    fn send(&mut self, rs: bool, value: u8) {
        self.rs.set_state(rs);
        self.bus.write(value);
        self.en.set_high();
        self.delay.delay_us(PULSE_US);
        self.en.set_low();
    }
}

impl<RS, EN, B, D> CharacterDisplay for St7066u<RS, EN, B, D>
where
    RS: OutputPin,
    EN: OutputPin,
    B: DataBus,
    D: DelayNs,
{
    fn initialize(&mut self, function: FunctionSet, control: DisplayControl, entry: EntryMode) {
        self.delay.delay_ms(POWER_ON_MS);

        // Reset by instruction: the controller may be in any bus mode
        self.send(false, CMD_WAKE);
        self.delay.delay_us(4100);
        self.send(false, CMD_WAKE);
        self.delay.delay_us(100);
        self.command(CMD_WAKE);

        self.command(function.instruction());
        self.command(control.instruction());
        self.command(CMD_CLEAR);
        self.command(entry.instruction());
    }

    fn clear_display(&mut self) {
        self.command(CMD_CLEAR);
    }

    fn set_cursor_address(&mut self, address: u8) {
        self.command(CMD_SET_DDRAM | (address & 0x7F));
    }

    fn write_str(&mut self, text: &str) {
        for byte in text.bytes() {
            self.data(byte);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eeview_core::viewer::{DISPLAY_CONTROL, ENTRY_MODE, FUNCTION_SET};
    use eeview_hal::sim::SimRegisters;
    use eeview_hal::{Pin, PinId, Port, Register};
    use heapless::Vec;

    /// Shared log of latched bytes: (rs, value)
    struct Latch {
        rs: bool,
        bus: u8,
        log: Vec<(bool, u8), 64>,
    }

    struct MockPin<'a> {
        latch: &'a core::cell::RefCell<Latch>,
        enable: bool,
        high: bool,
    }

    impl OutputPin for MockPin<'_> {
        fn set_high(&mut self) {
            self.high = true;
            if !self.enable {
                self.latch.borrow_mut().rs = true;
            }
        }

        fn set_low(&mut self) {
            // Falling edge of E latches the bus
            if self.enable && self.high {
                let mut latch = self.latch.borrow_mut();
                let entry = (latch.rs, latch.bus);
                let _ = latch.log.push(entry);
            }
            self.high = false;
            if !self.enable {
                self.latch.borrow_mut().rs = false;
            }
        }

        fn toggle(&mut self) {
            if self.high {
                self.set_low();
            } else {
                self.set_high();
            }
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    struct MockBus<'a> {
        latch: &'a core::cell::RefCell<Latch>,
    }

    impl DataBus for MockBus<'_> {
        fn write(&mut self, value: u8) {
            self.latch.borrow_mut().bus = value;
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn latch() -> core::cell::RefCell<Latch> {
        core::cell::RefCell::new(Latch {
            rs: false,
            bus: 0,
            log: Vec::new(),
        })
    }

    fn lcd(latch: &core::cell::RefCell<Latch>) -> St7066u<MockPin<'_>, MockPin<'_>, MockBus<'_>, NoDelay> {
        St7066u::new(
            MockPin { latch, enable: false, high: false },
            MockPin { latch, enable: true, high: false },
            MockBus { latch },
            NoDelay,
        )
    }

    #[test]
    fn test_initialize_sequence() {
        let latch = latch();
        let mut display = lcd(&latch);

        display.initialize(FUNCTION_SET, DISPLAY_CONTROL, ENTRY_MODE);

        let latch = latch.borrow();
        assert_eq!(
            latch.log.as_slice(),
            &[
                (false, 0x30),
                (false, 0x30),
                (false, 0x30),
                (false, 0x38),
                (false, 0x0C),
                (false, 0x01),
                (false, 0x06),
            ]
        );
    }

    #[test]
    fn test_text_and_cursor() {
        let latch = latch();
        let mut display = lcd(&latch);

        display.clear_display();
        display.write_str("Hi");
        display.set_cursor_address(0x40);

        let latch = latch.borrow();
        assert_eq!(
            latch.log.as_slice(),
            &[(false, 0x01), (true, b'H'), (true, b'i'), (false, 0xC0)]
        );
    }

    #[test]
    fn test_pin_group_bus_leaves_other_pins() {
        let regs = SimRegisters::new();
        regs.preset(Register::Odr(Port::A), 0x8000);
        let mut bus = PinGroup::new(&regs, Port::A, 0, 8);

        DataBus::write(&mut bus, 0xA5);

        assert_eq!(regs.peek(Register::Odr(Port::A)), 0x80A5);
        assert_eq!(regs.writes(Register::Bsrr(Port::A)), 1);
    }

    #[test]
    fn test_on_register_pins() {
        let regs = SimRegisters::new();
        let rs = Pin::new(&regs, PinId::new(Port::B, 8));
        let en = Pin::new(&regs, PinId::new(Port::B, 9));
        let bus = PinGroup::new(&regs, Port::A, 0, 8);
        let mut display = St7066u::new(rs, en, bus, NoDelay);

        display.write_str("A");

        assert_eq!(regs.peek(Register::Odr(Port::A)) & 0xFF, u32::from(b'A'));
        // RS high for data, E back low after the pulse
        assert_eq!(regs.peek(Register::Odr(Port::B)), 1 << 8);
    }
}
