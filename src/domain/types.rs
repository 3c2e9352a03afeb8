//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - deserialized straight from the sales CSV
//! - used in-memory by the report handlers
//! - exported to JSON alongside the chart data

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

/// First year offered by the year selector.
pub const YEAR_MIN: i32 = 1980;
/// Last year offered by the year selector (inclusive).
pub const YEAR_MAX: i32 = 2023;

/// Report type chosen in the statistics dropdown.
///
/// The "unset" state (placeholder shown, nothing picked) is modelled as
/// `Option<ReportKind>::None` rather than a third variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// "Yearly Statistics"
    Yearly,
    /// "Recession Period Statistics"
    Recession,
}

impl ReportKind {
    pub const ALL: [ReportKind; 2] = [ReportKind::Yearly, ReportKind::Recession];

    /// Label shown in the dropdown (and the value the dropdown reports).
    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Yearly => "Yearly Statistics",
            ReportKind::Recession => "Recession Period Statistics",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::Yearly => "yearly",
            ReportKind::Recession => "recession",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar month of an observation.
///
/// Ordering follows the calendar, so grouping by month yields Jan..Dec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// 1-based month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Accepts `Jan`, `January`, `jan`, or `1`..`12`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Ok(n) = trimmed.parse::<usize>() {
            return (1..=12).contains(&n).then(|| Self::ALL[n - 1]);
        }
        if trimmed.len() < 3 {
            return None;
        }
        let lower = trimmed.to_ascii_lowercase();
        Self::ALL.into_iter().find(|m| {
            let abbrev = m.abbrev().to_ascii_lowercase();
            lower == abbrev || (lower.starts_with(&abbrev) && full_name(*m) == lower)
        })
    }
}

fn full_name(month: Month) -> &'static str {
    match month {
        Month::Jan => "january",
        Month::Feb => "february",
        Month::Mar => "march",
        Month::Apr => "april",
        Month::May => "may",
        Month::Jun => "june",
        Month::Jul => "july",
        Month::Aug => "august",
        Month::Sep => "september",
        Month::Oct => "october",
        Month::Nov => "november",
        Month::Dec => "december",
    }
}

impl TryFrom<String> for Month {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Month::parse(&value).ok_or_else(|| format!("invalid month '{value}'"))
    }
}

impl From<Month> for String {
    fn from(value: Month) -> Self {
        value.abbrev().to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// One row of the historical sales file.
///
/// Only the columns the dashboard reads are mapped; the remaining columns of
/// the source file (GDP, Price, City, ...) are ignored on deserialize.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: Month,
    #[serde(rename = "Recession", deserialize_with = "deserialize_flag")]
    pub recession: bool,
    #[serde(rename = "Vehicle_Type")]
    pub vehicle_type: String,
    #[serde(rename = "Automobile_Sales", deserialize_with = "deserialize_measure")]
    pub automobile_sales: f64,
    #[serde(rename = "Advertising_Expenditure", deserialize_with = "deserialize_measure")]
    pub advertising_expenditure: f64,
    #[serde(rename = "unemployment_rate", deserialize_with = "deserialize_measure")]
    pub unemployment_rate: f64,
}

/// `Recession` is stored as `0`/`1`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "1" | "1.0" => Ok(true),
        "0" | "0.0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid recession flag '{other}' (expected 0 or 1)"
        ))),
    }
}

/// Numeric cells; blank, `NA` and `NaN` cells load as NaN and are skipped by
/// the aggregations.
fn deserialize_measure<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("na") || raw.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>()
        .map_err(|e| serde::de::Error::custom(format!("invalid number '{raw}': {e}")))
}
