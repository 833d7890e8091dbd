//! Build-time configuration
//!
//! All wiring and sizing is fixed at compile time; there is no runtime
//! configuration source.

pub mod board;
