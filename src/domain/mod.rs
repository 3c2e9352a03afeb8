//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - the report selector enum (`ReportKind`) and selectable year range
//! - calendar months (`Month`)
//! - the raw sales observation (`SalesRecord`)

pub mod types;

pub use types::*;
