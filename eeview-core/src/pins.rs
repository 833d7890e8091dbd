//! Logical pin roles and the board pin table
//!
//! A board describes its wiring as a `const` [`PinMap`]: one
//! [`PinAssignment`] per role, each with the configuration applied at boot
//! and, for interrupt sources, the edge and priority to bind.
//! [`PinMap::validate`] is a `const fn` so a board can reject a bad table
//! at compile time.

use eeview_hal::exti::line_for;
use eeview_hal::{
    bind_interrupt, configure_pin, BindingConflict, Edge, InterruptLine, IrqController, PinConfig,
    PinId, Port, Priority, RegisterFile,
};
use heapless::Vec;

/// Maximum number of bound interrupt lines (one per EXTI line)
pub const MAX_INTERRUPTS: usize = 16;

/// Logical identity of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRole {
    /// Heartbeat/diagnostic LED
    StatusLed,
    /// Quadrature channel A
    EncoderA,
    /// Quadrature channel B
    EncoderB,
    /// Encoder push switch
    EncoderSwitch,
    /// I2C clock
    I2cScl,
    /// I2C data
    I2cSda,
    /// Display register select
    LcdRegisterSelect,
    /// Display enable strobe
    LcdEnable,
    /// Display data bus bit (0-7)
    LcdData(u8),
    /// Pin reclaimed from a debug or boot function and parked as input
    Released,
}

/// Edge interrupt to bind for a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptSpec {
    pub edge: Edge,
    pub priority: Priority,
}

/// One row of a board pin table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    pub role: PinRole,
    pub pin: PinId,
    pub config: PinConfig,
    pub interrupt: Option<InterruptSpec>,
}

impl PinAssignment {
    pub const fn new(role: PinRole, pin: PinId, config: PinConfig) -> Self {
        Self {
            role,
            pin,
            config,
            interrupt: None,
        }
    }

    /// Bind an edge interrupt for this pin during [`PinMap::bind_all`]
    pub const fn with_interrupt(mut self, edge: Edge, priority: Priority) -> Self {
        self.interrupt = Some(InterruptSpec { edge, priority });
        self
    }
}

/// Pin table defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMapError {
    /// Pin number outside 0-15
    InvalidPin(PinId),
    /// A physical pin is listed twice
    DuplicatePin(PinId),
    /// A role is assigned to two pins
    DuplicateRole(PinRole),
    /// Two interrupt sources alias to one EXTI line
    LineConflict(BindingConflict),
}

/// Board pin table
#[derive(Debug, Clone, Copy)]
pub struct PinMap<'a> {
    entries: &'a [PinAssignment],
}

impl<'a> PinMap<'a> {
    pub const fn new(entries: &'a [PinAssignment]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'a [PinAssignment] {
        self.entries
    }

    /// Number of entries with an interrupt binding
    pub const fn interrupt_count(&self) -> usize {
        let mut count = 0;
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].interrupt.is_some() {
                count += 1;
            }
            i += 1;
        }
        count
    }

    /// Pins of the entries with an interrupt binding, in table order
    ///
    /// `N` must equal [`interrupt_count`](Self::interrupt_count).
    pub const fn interrupt_pins<const N: usize>(&self) -> [PinId; N] {
        assert!(N == self.interrupt_count(), "interrupt pin count mismatch");

        let mut pins = [PinId::new(Port::A, 0); N];
        let mut n = 0;
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].interrupt.is_some() {
                pins[n] = self.entries[i].pin;
                n += 1;
            }
            i += 1;
        }
        pins
    }

    /// Check the table: valid pin numbers, unique pins, unique roles,
    /// disjoint EXTI lines
    ///
    /// Reports the first defect in table order.
    pub const fn validate(&self) -> Result<(), PinMapError> {
        let entries = self.entries;
        let mut i = 0;
        while i < entries.len() {
            let a = &entries[i];
            if !a.pin.is_valid() {
                return Err(PinMapError::InvalidPin(a.pin));
            }
            let mut j = i + 1;
            while j < entries.len() {
                let b = &entries[j];
                if same_pin(a.pin, b.pin) {
                    return Err(PinMapError::DuplicatePin(b.pin));
                }
                if same_role(a.role, b.role) {
                    return Err(PinMapError::DuplicateRole(b.role));
                }
                if a.interrupt.is_some()
                    && b.interrupt.is_some()
                    && line_for(a.pin) == line_for(b.pin)
                {
                    return Err(PinMapError::LineConflict(BindingConflict {
                        line: line_for(a.pin),
                        first: a.pin,
                        second: b.pin,
                    }));
                }
                j += 1;
            }
            i += 1;
        }
        Ok(())
    }

    /// Apply every entry's configuration, in table order
    ///
    /// Must run before any interrupt that touches the same registers is
    /// enabled.
    pub fn configure_all<R: RegisterFile + ?Sized>(&self, regs: &R) {
        for entry in self.entries {
            configure_pin(regs, entry.pin, &entry.config);
        }
    }

    /// Bind the interrupt of every entry that has one
    pub fn bind_all<R, C>(&self, regs: &R, irq: &mut C) -> Vec<InterruptLine, MAX_INTERRUPTS>
    where
        R: RegisterFile + ?Sized,
        C: IrqController + ?Sized,
    {
        let mut lines = Vec::new();
        for entry in self.entries {
            if let Some(spec) = entry.interrupt {
                let line = bind_interrupt(regs, irq, entry.pin, spec.edge, spec.priority);
                // A validated table has at most one binding per line
                let _ = lines.push(line);
            }
        }
        lines
    }
}

const fn same_pin(a: PinId, b: PinId) -> bool {
    a.port.index() == b.port.index() && a.pin == b.pin
}

const fn same_role(a: PinRole, b: PinRole) -> bool {
    match (a, b) {
        (PinRole::Released, PinRole::Released) => false,
        (PinRole::LcdData(x), PinRole::LcdData(y)) => x == y,
        (PinRole::LcdData(_), _) | (_, PinRole::LcdData(_)) => false,
        _ => role_tag(a) == role_tag(b),
    }
}

const fn role_tag(role: PinRole) -> u8 {
    match role {
        PinRole::StatusLed => 0,
        PinRole::EncoderA => 1,
        PinRole::EncoderB => 2,
        PinRole::EncoderSwitch => 3,
        PinRole::I2cScl => 4,
        PinRole::I2cSda => 5,
        PinRole::LcdRegisterSelect => 6,
        PinRole::LcdEnable => 7,
        PinRole::LcdData(_) => 8,
        PinRole::Released => 9,
    }
}
