//! Simulated register file for host tests
//!
//! Behaves like the hardware where it matters to the firmware:
//!
//! - `BSRR` writes update `ODR` (set bits win over reset bits) and read
//!   back as zero
//! - `EXTI_PR` is write-one-to-clear
//! - `IDR` ignores writes; tests drive inputs with [`SimRegisters::set_input`]
//!
//! Every `write` through the [`RegisterFile`] trait is counted per register
//! so tests can assert how many accesses an operation made.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::exti::{IrqController, Priority, Vector};
use crate::regs::{Port, Register, RegisterFile};

#[allow(clippy::declare_interior_mutable_const)]
const ZERO: AtomicU32 = AtomicU32::new(0);

/// Register file backed by atomics
pub struct SimRegisters {
    cells: [AtomicU32; Register::COUNT],
    writes: [AtomicU32; Register::COUNT],
}

impl Default for SimRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl SimRegisters {
    /// All registers zero (the reset value of everything the firmware uses)
    pub const fn new() -> Self {
        Self {
            cells: [ZERO; Register::COUNT],
            writes: [ZERO; Register::COUNT],
        }
    }

    /// Current raw value, without side effects
    pub fn peek(&self, reg: Register) -> u32 {
        self.cells[reg.index()].load(Ordering::SeqCst)
    }

    /// Seed a register value without counting it as a write
    pub fn preset(&self, reg: Register, value: u32) {
        self.cells[reg.index()].store(value, Ordering::SeqCst);
    }

    /// Drive the input levels of a port
    pub fn set_input(&self, port: Port, bits: u32) {
        self.preset(Register::Idr(port), bits);
    }

    /// Latch a pending flag as the EXTI peripheral would on an edge
    pub fn raise(&self, line: u8) {
        self.cells[Register::ExtiPr.index()].fetch_or(1 << line, Ordering::SeqCst);
    }

    /// Number of writes issued to `reg` through [`RegisterFile::write`]
    pub fn writes(&self, reg: Register) -> u32 {
        self.writes[reg.index()].load(Ordering::SeqCst)
    }
}

impl RegisterFile for SimRegisters {
    fn read(&self, reg: Register) -> u32 {
        match reg {
            Register::Bsrr(_) => 0,
            _ => self.peek(reg),
        }
    }

    fn write(&self, reg: Register, value: u32) {
        self.writes[reg.index()].fetch_add(1, Ordering::SeqCst);

        match reg {
            Register::Bsrr(port) => {
                let set = value & 0xFFFF;
                let reset = value >> 16;
                let odr = &self.cells[Register::Odr(port).index()];
                let _ = odr.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                    Some((current & !reset) | set)
                });
            }
            Register::ExtiPr => {
                self.cells[reg.index()].fetch_and(!value, Ordering::SeqCst);
            }
            Register::Idr(_) => {}
            _ => self.preset(reg, value),
        }
    }
}

/// Interrupt controller that records what was configured
#[derive(Debug, Default)]
pub struct SimInterrupts {
    priorities: [Option<Priority>; Vector::COUNT],
    enabled: [bool; Vector::COUNT],
}

impl SimInterrupts {
    /// Nothing configured, everything masked
    pub fn new() -> Self {
        Self::default()
    }

    /// Priority set for `vector`, if any
    pub fn priority(&self, vector: Vector) -> Option<Priority> {
        self.priorities[vector.index()]
    }

    /// Whether `vector` was unmasked
    pub fn is_enabled(&self, vector: Vector) -> bool {
        self.enabled[vector.index()]
    }
}

impl IrqController for SimInterrupts {
    fn set_priority(&mut self, vector: Vector, priority: Priority) {
        self.priorities[vector.index()] = Some(priority);
    }

    fn enable(&mut self, vector: Vector) {
        self.enabled[vector.index()] = true;
    }
}
