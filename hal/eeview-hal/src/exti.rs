//! External interrupt (EXTI) line binding
//!
//! Each GPIO pin can raise an edge interrupt on EXTI line `pin % 16`.
//! The port is chosen per line through a SYSCFG selector, so PA0 and PB0
//! compete for line 0. Binding a second pin to a line that is already in
//! use silently re-routes the line to the new pin; that is how the
//! hardware works and [`bind_interrupt`] does not try to hide it.
//! [`check_lines`] detects such aliasing and is meant to be evaluated at
//! compile time over a board's pin table.

use crate::gpio::PinId;
use crate::regs::{Field, Register, RegisterFile};

/// Number of EXTI lines routed from GPIO pins
pub const LINE_COUNT: u8 = 16;

/// Edge(s) that trigger the interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high transition
    Rising,
    /// High to low transition
    Falling,
    /// Both transitions
    Both,
}

impl Edge {
    /// Whether the rising trigger is enabled
    pub const fn rising(self) -> bool {
        matches!(self, Edge::Rising | Edge::Both)
    }

    /// Whether the falling trigger is enabled
    pub const fn falling(self) -> bool {
        matches!(self, Edge::Falling | Edge::Both)
    }
}

/// Preemption priority level (0 is the most urgent)
///
/// Only the 4 implemented NVIC priority bits are meaningful, so valid
/// levels are 0-15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Priority(u8);

impl Priority {
    /// Lowest urgency
    pub const LOWEST: Self = Self(15);

    /// Create a priority level, clamped to 0-15
    pub const fn new(level: u8) -> Self {
        if level > 15 {
            Self(15)
        } else {
            Self(level)
        }
    }

    /// The level (0-15)
    pub const fn level(self) -> u8 {
        self.0
    }
}

/// Interrupt vectors that serve EXTI lines
///
/// Lines 0-4 have their own vector; 5-9 and 10-15 share one each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Vector {
    Exti0,
    Exti1,
    Exti2,
    Exti3,
    Exti4,
    Exti9_5,
    Exti15_10,
}

impl Vector {
    /// Number of distinct vectors
    pub const COUNT: usize = 7;

    /// Vector serving `line`
    pub const fn for_line(line: u8) -> Self {
        match line {
            0 => Vector::Exti0,
            1 => Vector::Exti1,
            2 => Vector::Exti2,
            3 => Vector::Exti3,
            4 => Vector::Exti4,
            5..=9 => Vector::Exti9_5,
            _ => Vector::Exti15_10,
        }
    }

    /// Dense index (0-6)
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Interrupt controller (NVIC) operations needed to deliver EXTI vectors
pub trait IrqController {
    /// Set the preemption priority of a vector
    fn set_priority(&mut self, vector: Vector, priority: Priority);

    /// Unmask a vector
    fn enable(&mut self, vector: Vector);
}

/// A configured edge interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptLine {
    /// Pin routed to the line
    pub pin: PinId,
    /// Trigger edge(s)
    pub edge: Edge,
    /// Vector priority
    pub priority: Priority,
    /// Delivery enabled
    pub enabled: bool,
}

impl InterruptLine {
    /// EXTI line number
    pub const fn line(&self) -> u8 {
        line_for(self.pin)
    }

    /// Vector serving this line
    pub const fn vector(&self) -> Vector {
        Vector::for_line(self.line())
    }
}

/// EXTI line a pin is routed to
pub const fn line_for(pin: PinId) -> u8 {
    pin.pin % LINE_COUNT
}

/// Route `pin` to its EXTI line, select edges, set priority and enable
///
/// Call once per pin during init. A pin whose line is already bound
/// takes the line over without any error.
pub fn bind_interrupt<R, C>(
    regs: &R,
    irq: &mut C,
    pin: PinId,
    edge: Edge,
    priority: Priority,
) -> InterruptLine
where
    R: RegisterFile + ?Sized,
    C: IrqController + ?Sized,
{
    let line = line_for(pin);
    let bit = |on: bool| Field::slot(line, 1, u32::from(on));

    regs.modify(
        Register::Exticr(line / 4),
        Field::slot(line % 4, 4, pin.port.exti_selector()),
    );
    regs.modify(Register::ExtiRtsr, bit(edge.rising()));
    regs.modify(Register::ExtiFtsr, bit(edge.falling()));
    regs.modify(Register::ExtiImr, bit(true));

    let vector = Vector::for_line(line);
    irq.set_priority(vector, priority);
    irq.enable(vector);

    InterruptLine {
        pin,
        edge,
        priority,
        enabled: true,
    }
}

/// Whether `line` has a pending interrupt
pub fn is_pending<R: RegisterFile + ?Sized>(regs: &R, line: u8) -> bool {
    regs.read(Register::ExtiPr) & (1 << line) != 0
}

/// Clear the pending flag of `line`
///
/// One write-one-to-clear access; other lines' flags are unaffected.
pub fn clear_pending<R: RegisterFile + ?Sized>(regs: &R, line: u8) {
    regs.write(Register::ExtiPr, 1 << line);
}

/// Two pins that would share an EXTI line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BindingConflict {
    /// Contested line
    pub line: u8,
    /// Pin listed first
    pub first: PinId,
    /// Pin that would take the line over
    pub second: PinId,
}

/// Check that no two pins in `pins` alias to the same EXTI line
///
/// Returns the first conflicting pair in table order.
pub const fn check_lines(pins: &[PinId]) -> Result<(), BindingConflict> {
    let mut i = 0;
    while i < pins.len() {
        let mut j = i + 1;
        while j < pins.len() {
            if line_for(pins[i]) == line_for(pins[j]) {
                return Err(BindingConflict {
                    line: line_for(pins[i]),
                    first: pins[i],
                    second: pins[j],
                });
            }
            j += 1;
        }
        i += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regs::Port;
    use crate::sim::{SimInterrupts, SimRegisters};

    const ENC_A: PinId = PinId::new(Port::B, 0);
    const ENC_B: PinId = PinId::new(Port::B, 1);
    const SWITCH: PinId = PinId::new(Port::B, 2);

    #[test]
    fn test_bind_both_edges() {
        let regs = SimRegisters::new();
        let mut irq = SimInterrupts::new();

        let line = bind_interrupt(&regs, &mut irq, ENC_B, Edge::Both, Priority::new(11));

        assert_eq!(line.line(), 1);
        assert!(line.enabled);
        assert_eq!(regs.peek(Register::Exticr(0)), 1 << 4);
        assert_eq!(regs.peek(Register::ExtiImr), 1 << 1);
        assert_eq!(regs.peek(Register::ExtiRtsr), 1 << 1);
        assert_eq!(regs.peek(Register::ExtiFtsr), 1 << 1);
        assert_eq!(irq.priority(Vector::Exti1), Some(Priority::new(11)));
        assert!(irq.is_enabled(Vector::Exti1));
        assert!(!irq.is_enabled(Vector::Exti0));
    }

    #[test]
    fn test_bind_single_edge_clears_other_trigger() {
        let regs = SimRegisters::new();
        let mut irq = SimInterrupts::new();
        regs.preset(Register::ExtiFtsr, 0xFFFF);

        bind_interrupt(&regs, &mut irq, SWITCH, Edge::Rising, Priority::new(11));

        assert_eq!(regs.peek(Register::ExtiRtsr), 1 << 2);
        assert_eq!(regs.peek(Register::ExtiFtsr), 0xFFFF & !(1 << 2));
    }

    #[test]
    fn test_bind_three_lines_share_exticr0() {
        let regs = SimRegisters::new();
        let mut irq = SimInterrupts::new();

        for pin in [ENC_A, ENC_B, SWITCH] {
            bind_interrupt(&regs, &mut irq, pin, Edge::Both, Priority::new(11));
        }

        assert_eq!(regs.peek(Register::Exticr(0)), 0x0111);
        assert_eq!(regs.peek(Register::ExtiImr), 0b111);
    }

    #[test]
    fn test_aliasing_binding_overrides_silently() {
        let regs = SimRegisters::new();
        let mut irq = SimInterrupts::new();

        bind_interrupt(&regs, &mut irq, PinId::new(Port::A, 0), Edge::Both, Priority::new(11));
        bind_interrupt(&regs, &mut irq, PinId::new(Port::C, 0), Edge::Rising, Priority::new(5));

        // Line 0 now follows PC0 with the later edge selection
        assert_eq!(regs.peek(Register::Exticr(0)) & 0xF, 2);
        assert_eq!(regs.peek(Register::ExtiFtsr) & 1, 0);
        assert_eq!(irq.priority(Vector::Exti0), Some(Priority::new(5)));
    }

    #[test]
    fn test_high_lines_use_shared_vectors() {
        assert_eq!(Vector::for_line(5), Vector::Exti9_5);
        assert_eq!(Vector::for_line(9), Vector::Exti9_5);
        assert_eq!(Vector::for_line(10), Vector::Exti15_10);
        assert_eq!(Vector::for_line(15), Vector::Exti15_10);
    }

    #[test]
    fn test_exticr_register_for_high_line() {
        let regs = SimRegisters::new();
        let mut irq = SimInterrupts::new();

        bind_interrupt(&regs, &mut irq, PinId::new(Port::C, 13), Edge::Falling, Priority::new(3));

        assert_eq!(regs.peek(Register::Exticr(3)), 2 << 4);
        assert!(irq.is_enabled(Vector::Exti15_10));
    }

    #[test]
    fn test_clear_pending_only_own_line() {
        let regs = SimRegisters::new();
        regs.raise(0);
        regs.raise(1);

        clear_pending(&regs, 1);

        assert!(is_pending(&regs, 0));
        assert!(!is_pending(&regs, 1));
        assert_eq!(regs.writes(Register::ExtiPr), 1);
    }

    #[test]
    fn test_check_lines_accepts_disjoint_pins() {
        assert_eq!(check_lines(&[ENC_A, ENC_B, SWITCH]), Ok(()));
        assert_eq!(check_lines(&[]), Ok(()));
    }

    #[test]
    fn test_check_lines_reports_alias() {
        let other = PinId::new(Port::A, 1);
        assert_eq!(
            check_lines(&[ENC_A, ENC_B, other]),
            Err(BindingConflict {
                line: 1,
                first: ENC_B,
                second: other,
            })
        );
    }

    #[test]
    fn test_check_lines_is_const() {
        const RESULT: Result<(), BindingConflict> = check_lines(&[ENC_A, SWITCH]);
        assert!(RESULT.is_ok());
    }

    #[test]
    fn test_priority_clamped() {
        assert_eq!(Priority::new(40), Priority::LOWEST);
        assert_eq!(Priority::new(11).level(), 11);
    }
}
