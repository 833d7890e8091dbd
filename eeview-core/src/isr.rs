//! Edge interrupt service logic
//!
//! The firmware's EXTI vectors are thin wrappers around [`EdgeHandler`]:
//! sample the encoder inputs, hand the snapshot to a queue without
//! waiting, and acknowledge the line.

use eeview_hal::exti::clear_pending;
use eeview_hal::{PinId, Register, RegisterFile};

use crate::queue::EventSink;

/// Input levels captured at interrupt time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawInputEvent {
    /// Bit 0: channel A, bit 1: channel B
    pub bits: u8,
}

impl RawInputEvent {
    pub const A: u8 = 1 << 0;
    pub const B: u8 = 1 << 1;

    pub const fn new(a: bool, b: bool) -> Self {
        Self {
            bits: (a as u8) | ((b as u8) << 1),
        }
    }

    pub const fn a(self) -> bool {
        self.bits & Self::A != 0
    }

    pub const fn b(self) -> bool {
        self.bits & Self::B != 0
    }
}

/// What happened to the captured snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    Queued,
    /// Queue full, snapshot discarded
    Dropped,
}

/// Interrupt-context producer for encoder edges
///
/// Holds only shared references, so it can be a `static` read from every
/// EXTI vector.
pub struct EdgeHandler<'a, R: ?Sized, Q: ?Sized> {
    regs: &'a R,
    queue: &'a Q,
    channel_a: PinId,
    channel_b: PinId,
}

impl<'a, R, Q> EdgeHandler<'a, R, Q>
where
    R: RegisterFile + ?Sized,
    Q: EventSink<RawInputEvent> + ?Sized,
{
    pub const fn new(regs: &'a R, queue: &'a Q, channel_a: PinId, channel_b: PinId) -> Self {
        Self {
            regs,
            queue,
            channel_a,
            channel_b,
        }
    }

    /// Snapshot of both encoder channels
    ///
    /// One input register read when both channels share a port.
    pub fn capture(&self) -> RawInputEvent {
        let idr_a = self.regs.read(Register::Idr(self.channel_a.port));
        let idr_b = if self.channel_b.port == self.channel_a.port {
            idr_a
        } else {
            self.regs.read(Register::Idr(self.channel_b.port))
        };
        RawInputEvent::new(
            idr_a & self.channel_a.mask() != 0,
            idr_b & self.channel_b.mask() != 0,
        )
    }

    /// Service an edge on `line`
    ///
    /// Never blocks. The pending flag of `line` is cleared exactly once,
    /// whether or not the snapshot fit in the queue.
    pub fn on_edge(&self, line: u8) -> EdgeOutcome {
        let event = self.capture();
        let outcome = match self.queue.try_enqueue(event) {
            Ok(()) => EdgeOutcome::Queued,
            Err(_) => EdgeOutcome::Dropped,
        };
        clear_pending(self.regs, line);
        outcome
    }

    /// Clear the pending flag of `line` without forwarding anything
    pub fn acknowledge(&self, line: u8) {
        clear_pending(self.regs, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::EventQueue;
    use eeview_hal::exti::is_pending;
    use eeview_hal::sim::SimRegisters;
    use eeview_hal::Port;

    const ENC_A: PinId = PinId::new(Port::B, 0);
    const ENC_B: PinId = PinId::new(Port::B, 1);

    #[test]
    fn test_snapshot_masks_encoder_bits() {
        let regs = SimRegisters::new();
        let queue: EventQueue<RawInputEvent, 4> = EventQueue::new();
        let handler = EdgeHandler::new(&regs, &queue, ENC_A, ENC_B);

        regs.set_input(Port::B, 0xFFF6); // A low, B high, noise elsewhere
        regs.raise(1);

        assert_eq!(handler.on_edge(1), EdgeOutcome::Queued);
        assert_eq!(queue.try_receive(), Some(RawInputEvent { bits: RawInputEvent::B }));
        assert!(!is_pending(&regs, 1));
    }

    #[test]
    fn test_channels_on_different_ports() {
        let regs = SimRegisters::new();
        let queue: EventQueue<RawInputEvent, 4> = EventQueue::new();
        let handler = EdgeHandler::new(&regs, &queue, PinId::new(Port::A, 3), PinId::new(Port::C, 4));

        regs.set_input(Port::A, 1 << 3);
        regs.set_input(Port::C, 1 << 4);

        let event = handler.capture();
        assert!(event.a());
        assert!(event.b());
    }

    #[test]
    fn test_full_queue_still_clears_pending_once() {
        let regs = SimRegisters::new();
        let queue: EventQueue<RawInputEvent, 2> = EventQueue::new();
        let handler = EdgeHandler::new(&regs, &queue, ENC_A, ENC_B);

        for expected in [EdgeOutcome::Queued, EdgeOutcome::Queued, EdgeOutcome::Dropped] {
            let before = regs.writes(Register::ExtiPr);
            regs.raise(0);

            assert_eq!(handler.on_edge(0), expected);

            assert_eq!(regs.writes(Register::ExtiPr), before + 1);
            assert!(!is_pending(&regs, 0));
        }
        assert_eq!(queue.dropped(), 1);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_clear_leaves_other_lines_pending() {
        let regs = SimRegisters::new();
        let queue: EventQueue<RawInputEvent, 2> = EventQueue::new();
        let handler = EdgeHandler::new(&regs, &queue, ENC_A, ENC_B);

        regs.raise(0);
        regs.raise(1);
        handler.on_edge(0);

        assert!(!is_pending(&regs, 0));
        assert!(is_pending(&regs, 1));
    }

    #[test]
    fn test_acknowledge_does_not_enqueue() {
        let regs = SimRegisters::new();
        let queue: EventQueue<RawInputEvent, 2> = EventQueue::new();
        let handler = EdgeHandler::new(&regs, &queue, ENC_A, ENC_B);

        regs.raise(2);
        handler.acknowledge(2);

        assert!(!is_pending(&regs, 2));
        assert_eq!(regs.writes(Register::ExtiPr), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_event_bits() {
        assert_eq!(RawInputEvent::new(true, false).bits, 0b01);
        assert_eq!(RawInputEvent::new(false, true).bits, 0b10);
        assert!(!RawInputEvent::default().a());
    }
}
