//! Encoder processor trait

use crate::isr::RawInputEvent;

/// Decoded encoder position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionEvent {
    pub position: u16,
}

/// Turns raw channel snapshots into bounded positions
///
/// Debouncing and direction decoding are up to the implementation; the
/// snapshots arrive in interrupt order, unfiltered.
pub trait EncoderProcessor {
    /// Reset the position to `lower` and clamp all future positions to
    /// `lower..=upper`
    fn init(&mut self, lower: u16, upper: u16);

    /// Feed one snapshot
    ///
    /// Returns an event when the position changed.
    fn process(&mut self, input: RawInputEvent) -> Option<PositionEvent>;

    /// Current position
    fn position(&self) -> u16;
}
