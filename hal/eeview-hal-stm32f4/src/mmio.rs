//! Memory-mapped register file for STM32F4
//!
//! Addresses follow RM0383 (STM32F411). Every access is a single volatile
//! 32-bit load or store.

use eeview_hal::{Port, Register, RegisterFile};

/// GPIOA base; ports A-E are 0x400 apart
const GPIO_BASE: usize = 0x4002_0000;
const GPIO_STRIDE: usize = 0x400;
/// GPIOH sits after the gap left by F/G
const GPIOH_BASE: usize = 0x4002_1C00;

const SYSCFG_BASE: usize = 0x4001_3800;
const EXTI_BASE: usize = 0x4001_3C00;

mod offset {
    pub const MODER: usize = 0x00;
    pub const OTYPER: usize = 0x04;
    pub const OSPEEDR: usize = 0x08;
    pub const PUPDR: usize = 0x0C;
    pub const IDR: usize = 0x10;
    pub const ODR: usize = 0x14;
    pub const BSRR: usize = 0x18;
    pub const AFRL: usize = 0x20;
    pub const AFRH: usize = 0x24;

    pub const EXTICR1: usize = 0x08;

    pub const IMR: usize = 0x00;
    pub const RTSR: usize = 0x08;
    pub const FTSR: usize = 0x0C;
    pub const PR: usize = 0x14;
}

/// Base address of a GPIO port
pub const fn port_base(port: Port) -> usize {
    match port {
        Port::H => GPIOH_BASE,
        _ => GPIO_BASE + port.index() * GPIO_STRIDE,
    }
}

/// Absolute address of a register
pub const fn address(reg: Register) -> usize {
    match reg {
        Register::Moder(p) => port_base(p) + offset::MODER,
        Register::Otyper(p) => port_base(p) + offset::OTYPER,
        Register::Ospeedr(p) => port_base(p) + offset::OSPEEDR,
        Register::Pupdr(p) => port_base(p) + offset::PUPDR,
        Register::Idr(p) => port_base(p) + offset::IDR,
        Register::Odr(p) => port_base(p) + offset::ODR,
        Register::Bsrr(p) => port_base(p) + offset::BSRR,
        Register::Afrl(p) => port_base(p) + offset::AFRL,
        Register::Afrh(p) => port_base(p) + offset::AFRH,
        Register::Exticr(n) => SYSCFG_BASE + offset::EXTICR1 + 4 * (n as usize),
        Register::ExtiImr => EXTI_BASE + offset::IMR,
        Register::ExtiRtsr => EXTI_BASE + offset::RTSR,
        Register::ExtiFtsr => EXTI_BASE + offset::FTSR,
        Register::ExtiPr => EXTI_BASE + offset::PR,
    }
}

/// The chip's GPIO, SYSCFG and EXTI registers
///
/// Zero-sized; every instance refers to the same hardware. Read-modify-write
/// through [`RegisterFile::modify`] is not atomic, so configuration must run
/// before interrupts are enabled. Output primitives use BSRR and are safe
/// from any context.
#[derive(Debug, Clone, Copy)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// Handle to the register block
    ///
    /// # Safety
    ///
    /// The caller takes responsibility for not racing read-modify-write
    /// configuration with another owner of the same registers.
    pub const unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl RegisterFile for Mmio {
    fn read(&self, reg: Register) -> u32 {
        // SAFETY: address() only yields aligned, always-mapped peripheral registers
        unsafe { core::ptr::read_volatile(address(reg) as *const u32) }
    }

    fn write(&self, reg: Register, value: u32) {
        // SAFETY: see read()
        unsafe { core::ptr::write_volatile(address(reg) as *mut u32, value) }
    }
}
