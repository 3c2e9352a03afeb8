//! Input/output helpers.
//!
//! - report exports (JSON) (`export`)

pub mod export;

pub use export::*;
