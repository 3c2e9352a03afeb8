//! CSV parsing into the immutable sales table.
//!
//! The table is loaded once and never mutated; every view handed out is a
//! borrowed subset. Malformed input is a load-time failure (exit code 3), not
//! something to skip over.

use std::collections::BTreeSet;

use csv::StringRecord;

use crate::domain::SalesRecord;
use crate::error::AppError;

/// Columns the report handlers read.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Year",
    "Month",
    "Recession",
    "Vehicle_Type",
    "Automobile_Sales",
    "Advertising_Expenditure",
    "unemployment_rate",
];

/// Read-only table of sales observations, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

/// Summary of what was loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    pub rows: usize,
    pub recession_rows: usize,
    pub year_min: i32,
    pub year_max: i32,
    pub vehicle_types: Vec<String>,
}

impl SalesTable {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    /// Parse CSV bytes. Extra columns are ignored; missing required columns,
    /// unparseable cells, and an empty body all fail.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| AppError::data(format!("Failed to read CSV headers: {e}")))?
            .clone();
        let headers = normalize_headers(&headers);
        ensure_required_columns_exist(&headers)?;
        reader.set_headers(headers.clone());

        let mut records = Vec::new();
        for (idx, result) in reader.deserialize::<SalesRecord>().enumerate() {
            // +2: 1-based, plus the header line.
            let line = idx + 2;
            let record = result
                .map_err(|e| AppError::data(format!("Malformed CSV row at line {line}: {e}")))?;
            records.push(record);
        }

        let table = Self::new(records);
        if table.is_empty() {
            return Err(AppError::data("CSV contains no data rows."));
        }
        Ok(table)
    }

    pub fn rows(&self) -> impl Iterator<Item = &SalesRecord> + Clone + '_ {
        self.records.iter()
    }

    /// Rows flagged `Recession == 1`.
    pub fn recession_rows(&self) -> impl Iterator<Item = &SalesRecord> + Clone + '_ {
        self.records.iter().filter(|r| r.recession)
    }

    /// Rows observed in `year`.
    pub fn rows_for_year(&self, year: i32) -> impl Iterator<Item = &SalesRecord> + Clone + '_ {
        self.records.iter().filter(move |r| r.year == year)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> TableStats {
        let vehicle_types: BTreeSet<&str> =
            self.records.iter().map(|r| r.vehicle_type.as_str()).collect();
        TableStats {
            rows: self.records.len(),
            recession_rows: self.recession_rows().count(),
            year_min: self.records.iter().map(|r| r.year).min().unwrap_or(0),
            year_max: self.records.iter().map(|r| r.year).max().unwrap_or(0),
            vehicle_types: vehicle_types.into_iter().map(str::to_string).collect(),
        }
    }
}

fn normalize_headers(headers: &StringRecord) -> StringRecord {
    // A UTF-8 BOM on the first header would otherwise hide the `Date`/`Year`
    // column from serde.
    headers
        .iter()
        .map(|name| name.trim().trim_start_matches('\u{feff}').to_string())
        .collect()
}

fn ensure_required_columns_exist(headers: &StringRecord) -> Result<(), AppError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(AppError::data(format!(
        "Missing required column(s): {}",
        missing
            .iter()
            .map(|c| format!("`{c}`"))
            .collect::<Vec<_>>()
            .join(", ")
    )))
}
