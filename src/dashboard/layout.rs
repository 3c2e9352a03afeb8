//! Static page definition: title, the two dropdowns, and the output grid.
//!
//! The TUI draws exactly this; nothing here changes at runtime except each
//! dropdown's current value, which the dispatcher owns.

use crate::domain::{ReportKind, YEAR_MAX, YEAR_MIN};

pub const TITLE: &str = "Automobile Sales Statistics Dashboard";

/// Output region shape.
pub const GRID_ROWS: usize = 2;
pub const GRID_COLS: usize = 2;

/// A dropdown's static definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown<T> {
    pub placeholder: &'static str,
    pub options: Vec<T>,
}

impl<T: Copy + PartialEq> Dropdown<T> {
    /// Step through `[placeholder, options...]` cyclically. `None` is the
    /// placeholder.
    pub fn step(&self, current: Option<T>, delta: i32) -> Option<T> {
        let len = self.options.len() as i32 + 1;
        let pos = current
            .and_then(|v| self.options.iter().position(|o| *o == v))
            .map(|i| i as i32 + 1)
            .unwrap_or(0);
        let next = (pos + delta).rem_euclid(len);
        if next == 0 {
            None
        } else {
            Some(self.options[(next - 1) as usize])
        }
    }
}

pub fn report_dropdown() -> Dropdown<ReportKind> {
    Dropdown {
        placeholder: "Select a report type",
        options: ReportKind::ALL.to_vec(),
    }
}

pub fn year_dropdown() -> Dropdown<i32> {
    Dropdown {
        placeholder: "Select-year",
        options: (YEAR_MIN..=YEAR_MAX).collect(),
    }
}
