//! View controller: the two reactive handlers and the state they read.
//!
//! Handlers are pure functions of `(AppContext, Selection)`. The dispatcher
//! (`dispatch`) decides when to call them and where their results go; the
//! static page definition lives in `layout`.

use std::time::Duration;

use crate::charts::{self, ReportView};
use crate::data::{DataSource, SalesTable};
use crate::domain::ReportKind;

pub mod dispatch;
pub mod layout;

pub use dispatch::{Dispatcher, InputSlot, OutputSlot, OutputValue};

/// Everything the handlers may read. Built once at startup, immutable after.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub table: SalesTable,
    pub source: DataSource,
    /// Time spent fetching + parsing the CSV.
    pub load_time: Duration,
}

impl AppContext {
    pub fn new(table: SalesTable, source: DataSource, load_time: Duration) -> Self {
        Self {
            table,
            source,
            load_time,
        }
    }
}

/// Current values of the two selectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub report: Option<ReportKind>,
    pub year: Option<i32>,
}

/// Handler result: replace the output, or leave whatever is shown in place.
#[derive(Debug, Clone, PartialEq)]
pub enum Update<T> {
    NoUpdate,
    Replace(T),
}

impl<T> Update<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Update<U> {
        match self {
            Update::NoUpdate => Update::NoUpdate,
            Update::Replace(v) => Update::Replace(f(v)),
        }
    }
}

/// The year selector is only usable for yearly reports.
pub fn year_selector_disabled(report: Option<ReportKind>) -> bool {
    report != Some(ReportKind::Yearly)
}

/// Recompute the chart grid for the current selection.
///
/// - recession: always renders; the year is irrelevant
/// - yearly: renders only once a year is picked
/// - anything else: `NoUpdate`, so the previous grid stays on screen
pub fn render_report(ctx: &AppContext, selection: &Selection) -> Update<ReportView> {
    match (selection.report, selection.year) {
        (Some(ReportKind::Recession), _) => Update::Replace(charts::recession_report(&ctx.table)),
        (Some(ReportKind::Yearly), Some(year)) => {
            Update::Replace(charts::yearly_report(&ctx.table, year))
        }
        _ => Update::NoUpdate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Month, SalesRecord};

    fn ctx() -> AppContext {
        let rows = vec![
            SalesRecord {
                year: 1980,
                month: Month::Jan,
                recession: true,
                vehicle_type: "Sports".to_string(),
                automobile_sales: 10.0,
                advertising_expenditure: 1.0,
                unemployment_rate: 5.0,
            },
            SalesRecord {
                year: 1981,
                month: Month::Feb,
                recession: false,
                vehicle_type: "Sedan".to_string(),
                automobile_sales: 20.0,
                advertising_expenditure: 2.0,
                unemployment_rate: 4.0,
            },
        ];
        AppContext::new(
            SalesTable::new(rows),
            DataSource::parse("fixture.csv"),
            Duration::ZERO,
        )
    }

    #[test]
    fn selector_enabled_only_for_yearly() {
        assert!(!year_selector_disabled(Some(ReportKind::Yearly)));
        assert!(year_selector_disabled(Some(ReportKind::Recession)));
        assert!(year_selector_disabled(None));
    }

    #[test]
    fn recession_output_ignores_year() {
        let ctx = ctx();
        let recession = Selection {
            report: Some(ReportKind::Recession),
            year: None,
        };
        let base = render_report(&ctx, &recession);
        for year in [Some(1980), Some(1999), Some(2023)] {
            let other = render_report(&ctx, &Selection { year, ..recession });
            assert_eq!(other, base);
        }
        assert!(matches!(base, Update::Replace(_)));
    }

    #[test]
    fn yearly_without_year_and_unset_are_no_update() {
        let ctx = ctx();
        let yearly = Selection { report: Some(ReportKind::Yearly), year: None };
        assert_eq!(render_report(&ctx, &yearly), Update::NoUpdate);
        let unset = Selection { report: None, year: Some(1980) };
        assert_eq!(render_report(&ctx, &unset), Update::NoUpdate);
    }

    #[test]
    fn yearly_with_year_renders_that_year() {
        let ctx = ctx();
        let sel = Selection { report: Some(ReportKind::Yearly), year: Some(1981) };
        match render_report(&ctx, &sel) {
            Update::Replace(view) => {
                assert_eq!(view.kind, ReportKind::Yearly);
                assert_eq!(view.year, Some(1981));
            }
            Update::NoUpdate => panic!("expected a rendered view"),
        }
    }
}
