//! Encoder stage of the event pipeline
//!
//! ```text
//! EXTI edge ──► EdgeHandler ──► input queue ──► forward_next ──► position queue ──► PageViewer
//!  (interrupt)                                    (encoder task)                    (display task)
//! ```

use crate::isr::RawInputEvent;
use crate::queue::{EventQueue, EventSink};
use crate::traits::{EncoderProcessor, PositionEvent};

/// Result of one encoder step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Forward {
    /// Position changed and was queued
    Sent(PositionEvent),
    /// Position changed but the output queue was full
    Dropped(PositionEvent),
    /// Snapshot did not move the position
    Unchanged,
}

/// Wait for one raw snapshot, decode it and pass any new position on
///
/// The output side uses the same drop-newest policy as the interrupt side.
pub async fn forward_next<E, S, const N: usize>(
    encoder: &mut E,
    input: &EventQueue<RawInputEvent, N>,
    output: &S,
) -> Forward
where
    E: EncoderProcessor + ?Sized,
    S: EventSink<PositionEvent> + ?Sized,
{
    let raw = input.receive().await;
    match encoder.process(raw) {
        Some(event) => match output.try_enqueue(event) {
            Ok(()) => Forward::Sent(event),
            Err(_) => Forward::Dropped(event),
        },
        None => Forward::Unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isr::{EdgeHandler, EdgeOutcome};
    use crate::mock::{DisplayOp, MockDisplay, MockStorage, StepEncoder};
    use crate::viewer::{PageViewer, RowText};
    use eeview_hal::exti::is_pending;
    use eeview_hal::sim::SimRegisters;
    use eeview_hal::{PinId, Port, Register};
    use embassy_futures::block_on;

    const ENC_A: PinId = PinId::new(Port::B, 0);
    const ENC_B: PinId = PinId::new(Port::B, 1);

    #[test]
    fn test_forward_decoded_position() {
        let input: EventQueue<RawInputEvent, 4> = EventQueue::new();
        let output: EventQueue<PositionEvent, 4> = EventQueue::new();
        let mut encoder = StepEncoder::new();
        encoder.init(0, 30);

        input.try_enqueue(RawInputEvent::new(true, false)).unwrap();
        input.try_enqueue(RawInputEvent::new(false, false)).unwrap();

        assert_eq!(
            block_on(forward_next(&mut encoder, &input, &output)),
            Forward::Sent(PositionEvent { position: 1 })
        );
        assert_eq!(
            block_on(forward_next(&mut encoder, &input, &output)),
            Forward::Unchanged
        );
        assert_eq!(output.try_receive(), Some(PositionEvent { position: 1 }));
    }

    #[test]
    fn test_forward_drops_when_output_full() {
        let input: EventQueue<RawInputEvent, 4> = EventQueue::new();
        let output: EventQueue<PositionEvent, 1> = EventQueue::new();
        let mut encoder = StepEncoder::new();
        encoder.init(0, 30);

        for a in [true, false, true] {
            input.try_enqueue(RawInputEvent::new(a, false)).unwrap();
        }
        for _ in 0..3 {
            block_on(forward_next(&mut encoder, &input, &output));
        }

        assert_eq!(output.dropped(), 1);
        assert_eq!(output.try_receive(), Some(PositionEvent { position: 1 }));
    }

    #[test]
    fn test_edge_to_display() {
        let regs = SimRegisters::new();
        let input: EventQueue<RawInputEvent, 8> = EventQueue::new();
        let positions: EventQueue<PositionEvent, 8> = EventQueue::new();
        let handler = EdgeHandler::new(&regs, &input, ENC_A, ENC_B);

        let mut encoder = StepEncoder::new();
        encoder.init(0, 30);

        let mut storage = MockStorage::new();
        storage.fill(16, b"page one........");
        storage.fill(32, b"page two........");
        let mut viewer = PageViewer::new(storage, MockDisplay::new());

        // One full pulse on channel A
        for level in [1, 0] {
            regs.set_input(Port::B, level);
            regs.raise(0);
            assert_eq!(handler.on_edge(0), EdgeOutcome::Queued);
            assert!(!is_pending(&regs, 0));
        }
        assert_eq!(regs.writes(Register::ExtiPr), 2);

        while !input.is_empty() {
            block_on(forward_next(&mut encoder, &input, &positions));
        }

        let (event, report) = block_on(viewer.update(&positions));
        assert_eq!(event.position, 1);
        assert!(report.is_ok());

        let mut top = RowText::new();
        top.push_str("page one........").unwrap();
        let mut bottom = RowText::new();
        bottom.push_str("page two........").unwrap();
        assert_eq!(
            viewer.display().ops(),
            &[
                DisplayOp::Clear,
                DisplayOp::Write(top),
                DisplayOp::Cursor(0x40),
                DisplayOp::Write(bottom),
            ]
        );
    }
}
