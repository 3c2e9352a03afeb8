//! `autodash` library crate.
//!
//! An automobile sales statistics dashboard: the sales CSV is loaded once,
//! two report types are computed from it, and a small dispatcher keeps the
//! dropdowns and the 2×2 chart grid in sync. The binary (`autodash`) is a
//! thin wrapper so everything here is testable without a terminal.

pub mod aggregate;
pub mod app;
pub mod charts;
pub mod cli;
pub mod dashboard;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
pub mod tui;
