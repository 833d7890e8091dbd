//! Character display driver trait
//!
//! Options mirror the HD44780 instruction set, so the instruction byte for
//! each can be computed here and shared by every driver.

/// Data bus width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusWidth {
    FourBit,
    EightBit,
}

/// Character cell height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    Dots5x8,
    Dots5x10,
}

/// "Function set" options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FunctionSet {
    pub bus: BusWidth,
    pub two_lines: bool,
    pub font: Font,
}

impl FunctionSet {
    pub const fn instruction(self) -> u8 {
        let mut cmd = 0x20;
        if matches!(self.bus, BusWidth::EightBit) {
            cmd |= 0x10;
        }
        if self.two_lines {
            cmd |= 0x08;
        }
        if matches!(self.font, Font::Dots5x10) {
            cmd |= 0x04;
        }
        cmd
    }
}

/// "Display on/off control" options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayControl {
    pub display_on: bool,
    pub cursor_on: bool,
    pub blink_on: bool,
}

impl DisplayControl {
    pub const fn instruction(self) -> u8 {
        0x08 | (self.display_on as u8) << 2 | (self.cursor_on as u8) << 1 | self.blink_on as u8
    }
}

/// "Entry mode set" options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EntryMode {
    /// Move the cursor right after each character
    pub increment: bool,
    /// Shift the whole display instead of the cursor
    pub shift: bool,
}

impl EntryMode {
    pub const fn instruction(self) -> u8 {
        0x04 | (self.increment as u8) << 1 | self.shift as u8
    }
}

/// Text display with an addressable cursor
///
/// Calls are infallible: these displays are write-only and give no
/// acknowledgement.
pub trait CharacterDisplay {
    /// Power-on initialization
    fn initialize(&mut self, function: FunctionSet, control: DisplayControl, entry: EntryMode);

    /// Blank the display and home the cursor
    fn clear_display(&mut self);

    /// Move the cursor to display RAM address `address`
    ///
    /// The second line starts at 0x40 on two-line displays.
    fn set_cursor_address(&mut self, address: u8);

    /// Write `text` at the cursor
    fn write_str(&mut self, text: &str);
}

impl<T: CharacterDisplay + ?Sized> CharacterDisplay for &mut T {
    fn initialize(&mut self, function: FunctionSet, control: DisplayControl, entry: EntryMode) {
        (**self).initialize(function, control, entry)
    }

    fn clear_display(&mut self) {
        (**self).clear_display()
    }

    fn set_cursor_address(&mut self, address: u8) {
        (**self).set_cursor_address(address)
    }

    fn write_str(&mut self, text: &str) {
        (**self).write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions() {
        let function = FunctionSet {
            bus: BusWidth::EightBit,
            two_lines: true,
            font: Font::Dots5x8,
        };
        assert_eq!(function.instruction(), 0x38);

        let control = DisplayControl {
            display_on: true,
            cursor_on: false,
            blink_on: false,
        };
        assert_eq!(control.instruction(), 0x0C);

        let entry = EntryMode {
            increment: true,
            shift: false,
        };
        assert_eq!(entry.instruction(), 0x06);
    }

    #[test]
    fn test_four_bit_single_line() {
        let function = FunctionSet {
            bus: BusWidth::FourBit,
            two_lines: false,
            font: Font::Dots5x10,
        };
        assert_eq!(function.instruction(), 0x24);
    }
}
