//! Chart data model.
//!
//! Charts are plain data: the report handlers produce them, the TUI and the
//! text/JSON outputs consume them. Nothing here knows how to draw.

use serde::Serialize;

use crate::domain::ReportKind;

pub mod build;

pub use build::{recession_report, yearly_report};

/// Visual form of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartKind {
    Line { markers: bool },
    Bar,
    /// Bars at each x, one per series, side by side.
    GroupedBar,
    /// Each point is a slice; its share is `y / sum(y)`.
    Pie,
}

/// One plotted value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    /// Display text for the key (year, month, vehicle type, rate).
    pub label: String,
    /// Numeric position of the key: the year, month number, category index,
    /// or unemployment rate.
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl Chart {
    /// All points across series.
    pub fn points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.series.iter().flat_map(|s| s.points.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.points().next().is_none()
    }

    /// Sorted, de-duplicated x keys with their labels (first label wins).
    pub fn x_keys(&self) -> Vec<(f64, String)> {
        let mut keys: Vec<(f64, String)> = self
            .points()
            .map(|p| (p.x, p.label.clone()))
            .collect();
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        keys.dedup_by(|a, b| a.0 == b.0);
        keys
    }

    /// Pie slices as `(label, value, share)`; shares are of the finite total.
    pub fn shares(&self) -> Vec<(String, f64, f64)> {
        let total: f64 = self
            .points()
            .map(|p| p.y)
            .filter(|v| v.is_finite())
            .sum();
        self.points()
            .map(|p| {
                let share = if total != 0.0 && p.y.is_finite() {
                    p.y / total
                } else {
                    0.0
                };
                (p.label.clone(), p.y, share)
            })
            .collect()
    }
}

/// The output region: a 2×2 grid of charts for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub kind: ReportKind,
    /// Selected year for yearly reports; `None` for recession reports.
    pub year: Option<i32>,
    pub rows: [[Chart; 2]; 2],
}

impl ReportView {
    /// Charts in reading order (row-major).
    pub fn charts(&self) -> impl Iterator<Item = &Chart> + '_ {
        self.rows.iter().flat_map(|row| row.iter())
    }
}
