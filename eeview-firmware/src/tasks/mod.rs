//! Embassy async tasks
//!
//! Each task runs independently and communicates via the queues in
//! [`crate::channels`].

pub mod display;
pub mod encoder;
pub mod led;

pub use display::display_task;
pub use encoder::encoder_task;
pub use led::led_task;
