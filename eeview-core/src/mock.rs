//! Test doubles for the collaborator traits

use heapless::{String, Vec};

use crate::isr::RawInputEvent;
use crate::traits::{
    CharacterDisplay, DisplayControl, EncoderProcessor, EntryMode, FunctionSet, PositionEvent,
    Storage,
};

/// 512-byte EEPROM with a sequential-read address pointer
pub struct MockStorage {
    memory: [u8; 512],
    pointer: usize,
    calls: Vec<(u8, usize), 32>,
    /// Report this count from every write instead of the full length
    pub short_write: Option<usize>,
    /// Report this count from every read instead of the full length
    pub short_read: Option<usize>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            memory: [0; 512],
            pointer: 0,
            calls: Vec::new(),
            short_write: None,
            short_read: None,
        }
    }

    pub fn fill(&mut self, offset: usize, bytes: &[u8]) {
        self.memory[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// (bus address, request length) of every transfer
    pub fn calls(&self) -> &[(u8, usize)] {
        &self.calls
    }
}

impl Storage for MockStorage {
    fn write(&mut self, address: u8, bytes: &[u8]) -> usize {
        let _ = self.calls.push((address, bytes.len()));
        if let Some(n) = self.short_write {
            return n;
        }
        let block = usize::from(address - 0x50) << 8;
        self.pointer = block | usize::from(bytes[0]);
        bytes.len()
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> usize {
        let _ = self.calls.push((address, buf.len()));
        let n = self.short_read.unwrap_or(buf.len());
        for (i, b) in buf.iter_mut().enumerate() {
            *b = self.memory[(self.pointer + i) % self.memory.len()];
        }
        self.pointer = (self.pointer + buf.len()) % self.memory.len();
        n
    }
}

/// One recorded display call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Init(u8, u8, u8),
    Clear,
    Cursor(u8),
    Write(String<20>),
}

/// Display that records every call
pub struct MockDisplay {
    ops: Vec<DisplayOp, 64>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub fn ops(&self) -> &[DisplayOp] {
        &self.ops
    }
}

impl CharacterDisplay for MockDisplay {
    fn initialize(&mut self, function: FunctionSet, control: DisplayControl, entry: EntryMode) {
        let _ = self.ops.push(DisplayOp::Init(
            function.instruction(),
            control.instruction(),
            entry.instruction(),
        ));
    }

    fn clear_display(&mut self) {
        let _ = self.ops.push(DisplayOp::Clear);
    }

    fn set_cursor_address(&mut self, address: u8) {
        let _ = self.ops.push(DisplayOp::Cursor(address));
    }

    fn write_str(&mut self, text: &str) {
        let mut s = String::new();
        let _ = s.push_str(text);
        let _ = self.ops.push(DisplayOp::Write(s));
    }
}

/// Encoder that steps up on every rising edge of channel A
pub struct StepEncoder {
    position: u16,
    lower: u16,
    upper: u16,
    last: RawInputEvent,
}

impl StepEncoder {
    pub fn new() -> Self {
        Self {
            position: 0,
            lower: 0,
            upper: u16::MAX,
            last: RawInputEvent::default(),
        }
    }
}

impl EncoderProcessor for StepEncoder {
    fn init(&mut self, lower: u16, upper: u16) {
        self.lower = lower;
        self.upper = upper;
        self.position = lower;
    }

    fn process(&mut self, input: RawInputEvent) -> Option<PositionEvent> {
        let rising = input.a() && !self.last.a();
        self.last = input;
        if rising && self.position < self.upper {
            self.position += 1;
            Some(PositionEvent {
                position: self.position,
            })
        } else {
            None
        }
    }

    fn position(&self) -> u16 {
        self.position
    }
}
