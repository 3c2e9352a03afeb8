//! Text output for the headless `report` command.

pub mod format;

pub use format::{format_report, format_summary};
