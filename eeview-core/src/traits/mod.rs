//! Collaborator traits
//!
//! These traits define the interface between the core logic and the
//! drivers for the storage device, the character display and the rotary
//! encoder decoder.

pub mod display;
pub mod encoder;
pub mod storage;

pub use display::{CharacterDisplay, DisplayControl, EntryMode, FunctionSet};
pub use encoder::{EncoderProcessor, PositionEvent};
pub use storage::Storage;
