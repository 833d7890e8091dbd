//! Register model
//!
//! Every peripheral register the firmware touches is named by a
//! [`Register`] value. A [`RegisterFile`] maps those names onto storage:
//! volatile memory-mapped access on the target chip, or plain atomics in
//! [`crate::sim`] for host tests.
//!
//! Configuration writes go through [`RegisterFile::modify`] with a
//! [`Field`], so only the bits of one pin (or one interrupt line) change.
//! Runtime output changes never read-modify-write; they use the set/reset
//! register, which the hardware applies atomically per bit.

/// GPIO port
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    H,
}

impl Port {
    /// Number of GPIO ports on the register map
    pub const COUNT: usize = 6;

    /// All ports, in register map order
    pub const ALL: [Port; Port::COUNT] = [Port::A, Port::B, Port::C, Port::D, Port::E, Port::H];

    /// Dense index (0-based, in register map order)
    pub const fn index(self) -> usize {
        match self {
            Port::A => 0,
            Port::B => 1,
            Port::C => 2,
            Port::D => 3,
            Port::E => 4,
            Port::H => 5,
        }
    }

    /// Port selector value written to SYSCFG EXTICR (PA=0 .. PH=7)
    pub const fn exti_selector(self) -> u32 {
        match self {
            Port::A => 0,
            Port::B => 1,
            Port::C => 2,
            Port::D => 3,
            Port::E => 4,
            Port::H => 7,
        }
    }
}

/// A named peripheral register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Mode register (2 bits per pin)
    Moder(Port),
    /// Output type register (1 bit per pin)
    Otyper(Port),
    /// Output speed register (2 bits per pin)
    Ospeedr(Port),
    /// Pull-up/pull-down register (2 bits per pin)
    Pupdr(Port),
    /// Input data register (read-only)
    Idr(Port),
    /// Output data register
    Odr(Port),
    /// Bit set/reset register (write-only; low half sets, high half resets)
    Bsrr(Port),
    /// Alternate function low register (4 bits per pin, pins 0-7)
    Afrl(Port),
    /// Alternate function high register (4 bits per pin, pins 8-15)
    Afrh(Port),
    /// SYSCFG external interrupt configuration register 0-3
    Exticr(u8),
    /// EXTI interrupt mask register
    ExtiImr,
    /// EXTI rising trigger selection register
    ExtiRtsr,
    /// EXTI falling trigger selection register
    ExtiFtsr,
    /// EXTI pending register (write 1 to clear)
    ExtiPr,
}

/// Registers per GPIO port in the dense index
const PORT_REGISTERS: usize = 9;

/// Start of the SYSCFG/EXTI block in the dense index
const EXTI_BASE_INDEX: usize = Port::COUNT * PORT_REGISTERS;

impl Register {
    /// Number of distinct registers in the dense index
    pub const COUNT: usize = EXTI_BASE_INDEX + 4 + 4;

    /// Dense index of this register, `0..Register::COUNT`
    ///
    /// `Exticr` indices wrap modulo 4.
    pub const fn index(self) -> usize {
        const fn gpio(port: Port, offset: usize) -> usize {
            port.index() * PORT_REGISTERS + offset
        }

        match self {
            Register::Moder(p) => gpio(p, 0),
            Register::Otyper(p) => gpio(p, 1),
            Register::Ospeedr(p) => gpio(p, 2),
            Register::Pupdr(p) => gpio(p, 3),
            Register::Idr(p) => gpio(p, 4),
            Register::Odr(p) => gpio(p, 5),
            Register::Bsrr(p) => gpio(p, 6),
            Register::Afrl(p) => gpio(p, 7),
            Register::Afrh(p) => gpio(p, 8),
            Register::Exticr(n) => EXTI_BASE_INDEX + (n as usize & 0x3),
            Register::ExtiImr => EXTI_BASE_INDEX + 4,
            Register::ExtiRtsr => EXTI_BASE_INDEX + 5,
            Register::ExtiFtsr => EXTI_BASE_INDEX + 6,
            Register::ExtiPr => EXTI_BASE_INDEX + 7,
        }
    }
}

/// Mask/value pair describing one bit field of a register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Bits owned by the field
    pub mask: u32,
    /// New contents of those bits (always within `mask`)
    pub value: u32,
}

impl Field {
    /// Field of `width` bits at position `slot` (pin number or line number)
    pub const fn slot(slot: u8, width: u8, value: u32) -> Self {
        let shift = slot as u32 * width as u32;
        let ones = (1u32 << width) - 1;
        Self {
            mask: ones << shift,
            value: (value & ones) << shift,
        }
    }

    /// Apply the field to a register value, leaving all other bits alone
    pub const fn apply(self, current: u32) -> u32 {
        (current & !self.mask) | self.value
    }
}

/// Storage backing the named registers
///
/// Implementations must make single `read`/`write` calls atomic with
/// respect to interrupts (a 32-bit volatile access on Cortex-M is).
/// [`RegisterFile::modify`] is a read-modify-write and is only used during
/// initialization, which callers serialize.
pub trait RegisterFile {
    /// Read a register
    fn read(&self, reg: Register) -> u32;

    /// Write a register
    fn write(&self, reg: Register, value: u32);

    /// Masked modify: only the bits of `field.mask` change
    fn modify(&self, reg: Register, field: Field) {
        let current = self.read(reg);
        self.write(reg, field.apply(current));
    }
}

impl<T: RegisterFile + ?Sized> RegisterFile for &T {
    fn read(&self, reg: Register) -> u32 {
        (**self).read(reg)
    }

    fn write(&self, reg: Register, value: u32) {
        (**self).write(reg, value);
    }

    fn modify(&self, reg: Register, field: Field) {
        (**self).modify(reg, field);
    }
}
