//! Quadrature rotary encoder decoder
//!
//! Decodes the A/B snapshots captured by the edge interrupt into bounded
//! detent positions.
//!
//! The channels form a 2-bit Gray code. Clockwise, A leads B:
//!
//! ```text
//! phase:   0    1    2    3    0
//! (A,B): (0,0)(1,0)(1,1)(0,1)(0,0)
//! ```
//!
//! Each valid transition moves one quarter step. A transition that flips
//! both channels means an edge was missed (or bounced) and is ignored.
//! One detent is registered after a full cycle of quarter steps in the
//! same direction; bouncing back and forth cancels out.

use eeview_core::traits::{EncoderProcessor, PositionEvent};
use eeview_core::RawInputEvent;

/// Quarter steps per mechanical detent on common EC11-style encoders
pub const STEPS_PER_DETENT: i8 = 4;

/// Rotation sense of a completed detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

const fn phase(input: RawInputEvent) -> u8 {
    match (input.a(), input.b()) {
        (false, false) => 0,
        (true, false) => 1,
        (true, true) => 2,
        (false, true) => 3,
    }
}

/// Quadrature decoder with position bounds
pub struct QuadratureEncoder {
    steps_per_detent: i8,
    last_phase: Option<u8>,
    quarter_steps: i8,
    position: u16,
    lower: u16,
    upper: u16,
}

impl Default for QuadratureEncoder {
    fn default() -> Self {
        Self::new(STEPS_PER_DETENT)
    }
}

impl QuadratureEncoder {
    /// Create a decoder; call [`EncoderProcessor::init`] before use
    pub const fn new(steps_per_detent: i8) -> Self {
        Self {
            steps_per_detent,
            last_phase: None,
            quarter_steps: 0,
            position: 0,
            lower: 0,
            upper: u16::MAX,
        }
    }

    /// Track one snapshot; returns a direction when a detent completes
    fn decode(&mut self, input: RawInputEvent) -> Option<Direction> {
        let phase = phase(input);
        let Some(last) = self.last_phase.replace(phase) else {
            // First snapshot only establishes the reference phase
            return None;
        };

        match (phase + 4 - last) % 4 {
            1 => self.quarter_steps += 1,
            3 => self.quarter_steps -= 1,
            // No change, or both channels flipped
            _ => return None,
        }

        if self.quarter_steps >= self.steps_per_detent {
            self.quarter_steps = 0;
            Some(Direction::Clockwise)
        } else if self.quarter_steps <= -self.steps_per_detent {
            self.quarter_steps = 0;
            Some(Direction::CounterClockwise)
        } else {
            None
        }
    }
}

impl EncoderProcessor for QuadratureEncoder {
    fn init(&mut self, lower: u16, upper: u16) {
        self.lower = lower;
        self.upper = upper.max(lower);
        self.position = lower;
        self.quarter_steps = 0;
    }

    fn process(&mut self, input: RawInputEvent) -> Option<PositionEvent> {
        let next = match self.decode(input)? {
            Direction::Clockwise => self.position.saturating_add(1).min(self.upper),
            Direction::CounterClockwise => self.position.saturating_sub(1).max(self.lower),
        };

        if next == self.position {
            return None;
        }
        self.position = next;
        Some(PositionEvent { position: next })
    }

    fn position(&self) -> u16 {
        self.position
    }
}
