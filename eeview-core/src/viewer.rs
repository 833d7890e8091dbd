//! EEPROM page viewer
//!
//! Renders two consecutive 16-byte pages of a 512-byte I2C EEPROM on a
//! two-line character display. The encoder position selects the first
//! page; the second row shows the page after it, wrapping at the end of
//! the device.
//!
//! Transfer faults never escape: a short write or read is rendered as an
//! error line in place of the row's data and reported in the
//! [`RefreshReport`].

use core::fmt::{self, Write as _};
use core::future::Future;

use heapless::String;

use crate::queue::EventQueue;
use crate::traits::display::{BusWidth, Font};
use crate::traits::{
    CharacterDisplay, DisplayControl, EntryMode, FunctionSet, PositionEvent, Storage,
};

/// Device size in bytes
pub const EEPROM_SIZE: u16 = 512;

/// Bytes per page, and per display row
pub const PAGE_SIZE: usize = 16;

/// Bus address of the first 256-byte block
pub const EEPROM_ADDRESS: u8 = 0x50;

/// Display RAM address of the second line
pub const SECOND_ROW: u8 = 0x40;

/// Highest encoder position that still shows two full pages
pub const MAX_POSITION: u16 = (EEPROM_SIZE - 2 * PAGE_SIZE as u16) / PAGE_SIZE as u16;

/// Boot banner, one entry per display line
pub const BANNER: [&str; 2] = ["    Welcome!    ", "I2C EEPROM  Demo"];

/// How long the banner stays up before the first page is shown
pub const BANNER_HOLD_MS: u64 = 2000;

/// 8-bit bus, two lines, 5x8 font
pub const FUNCTION_SET: FunctionSet = FunctionSet {
    bus: BusWidth::EightBit,
    two_lines: true,
    font: Font::Dots5x8,
};

/// Display on, no cursor, no blink
pub const DISPLAY_CONTROL: DisplayControl = DisplayControl {
    display_on: true,
    cursor_on: false,
    blink_on: false,
};

/// Cursor moves right, display does not shift
pub const ENTRY_MODE: EntryMode = EntryMode {
    increment: true,
    shift: false,
};

/// Text of one display row
pub type RowText = String<20>;

/// A transfer that moved fewer bytes than requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareFault {
    /// Word address not accepted
    Write { written: usize },
    /// Page read came back short
    Read { read: usize },
}

/// Largest count shown in a fault message; keeps it within one row
const MAX_SHOWN_COUNT: usize = 99;

impl fmt::Display for HardwareFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareFault::Write { written } => {
                write!(f, "Write error [{}]", (*written).min(MAX_SHOWN_COUNT))
            }
            HardwareFault::Read { read } => {
                write!(f, "Read error [{}]", (*read).min(MAX_SHOWN_COUNT))
            }
        }
    }
}

impl HardwareFault {
    /// Line rendered in place of the row's data
    pub fn message(&self) -> RowText {
        let mut text = RowText::new();
        // At most "Write error [99]", 16 characters
        let _ = write!(text, "{}", self);
        text
    }
}

/// Outcome of one refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshReport {
    /// Byte offset of the first row
    pub offset: u16,
    /// Per-row result, top row first
    pub rows: [Result<(), HardwareFault>; 2],
}

impl RefreshReport {
    /// Both rows showed data
    pub fn is_ok(&self) -> bool {
        self.rows.iter().all(Result::is_ok)
    }

    /// Faults in row order
    pub fn faults(&self) -> impl Iterator<Item = HardwareFault> + '_ {
        self.rows.iter().filter_map(|r| r.err())
    }
}

/// Byte offset of the page shown in the top row for `position`
pub const fn page_offset(position: u16) -> u16 {
    ((position as u32 * PAGE_SIZE as u32) % EEPROM_SIZE as u32) as u16
}

/// Offset of the page after `offset`, wrapping at the device end
pub const fn next_page(offset: u16) -> u16 {
    (offset + PAGE_SIZE as u16) % EEPROM_SIZE
}

/// Bus address and word address of a byte offset
///
/// Bit 8 of the offset selects the 256-byte block through the low
/// address bits; the word address carries the rest.
pub const fn location(offset: u16) -> (u8, u8) {
    (EEPROM_ADDRESS + (offset >> 8) as u8, (offset & 0xFF) as u8)
}

/// Printable text of a page
///
/// Stops at the first NUL; bytes outside printable ASCII show as `.`.
pub fn row_text(bytes: &[u8]) -> RowText {
    let mut text = RowText::new();
    for &b in bytes.iter().take_while(|&&b| b != 0) {
        let c = if (0x20..=0x7E).contains(&b) { b as char } else { '.' };
        if text.push(c).is_err() {
            break;
        }
    }
    text
}

/// Storage-to-display renderer
pub struct PageViewer<S, D> {
    storage: S,
    display: D,
}

impl<S: Storage, D: CharacterDisplay> PageViewer<S, D> {
    pub fn new(storage: S, display: D) -> Self {
        Self { storage, display }
    }

    /// Initialize the display and show the banner
    pub fn show_banner(&mut self) {
        self.display
            .initialize(FUNCTION_SET, DISPLAY_CONTROL, ENTRY_MODE);
        self.display.clear_display();
        self.display.write_str(BANNER[0]);
        self.display.set_cursor_address(SECOND_ROW);
        self.display.write_str(BANNER[1]);
    }

    /// Banner, wait for `hold`, then the first page
    pub async fn boot<F: Future>(&mut self, hold: F) -> RefreshReport {
        self.show_banner();
        hold.await;
        self.refresh(0)
    }

    /// Fetch the page at `offset` as display text
    pub fn fetch_row(&mut self, offset: u16) -> Result<RowText, HardwareFault> {
        let (device, word) = location(offset);

        let written = self.storage.write(device, &[word]);
        if written != 1 {
            return Err(HardwareFault::Write { written });
        }

        let mut page = [0u8; PAGE_SIZE];
        let read = self.storage.read(device, &mut page);
        if read != PAGE_SIZE {
            return Err(HardwareFault::Read { read });
        }

        Ok(row_text(&page))
    }

    /// Show the two pages for `position`
    pub fn refresh(&mut self, position: u16) -> RefreshReport {
        let offset = page_offset(position);

        let top = self.fetch_row(offset);
        let bottom = self.fetch_row(next_page(offset));

        self.display.clear_display();
        self.display.write_str(&text_or_fault(&top));
        self.display.set_cursor_address(SECOND_ROW);
        self.display.write_str(&text_or_fault(&bottom));

        RefreshReport {
            offset,
            rows: [top.map(|_| ()), bottom.map(|_| ())],
        }
    }

    /// Wait for the next position and render it
    pub async fn update<const N: usize>(
        &mut self,
        events: &EventQueue<PositionEvent, N>,
    ) -> (PositionEvent, RefreshReport) {
        let event = events.receive().await;
        let report = self.refresh(event.position);
        (event, report)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}

fn text_or_fault(row: &Result<RowText, HardwareFault>) -> RowText {
    match row {
        Ok(text) => text.clone(),
        Err(fault) => fault.message(),
    }
}
