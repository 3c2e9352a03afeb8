//! Input/output slot dispatcher.
//!
//! A minimal observer: handlers are registered against the input slots they
//! watch and the single output slot they write. Changing an input re-runs the
//! watching handlers in registration order, one at a time, to completion.
//! `Update::NoUpdate` leaves the output slot exactly as it was.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::charts::ReportView;
use crate::dashboard::{AppContext, Selection, Update};
use crate::domain::ReportKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSlot {
    ReportType,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputSlot {
    YearSelectorDisabled,
    ReportOutput,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    Disabled(bool),
    Report(ReportView),
}

type Handler = Box<dyn Fn(&AppContext, &Selection) -> Update<OutputValue>>;

struct Registration {
    name: &'static str,
    watches: Vec<InputSlot>,
    output: OutputSlot,
    handler: Handler,
}

pub struct Dispatcher {
    ctx: AppContext,
    selection: Selection,
    outputs: HashMap<OutputSlot, OutputValue>,
    registrations: Vec<Registration>,
}

impl Dispatcher {
    /// Empty dispatcher; nothing registered.
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            selection: Selection::default(),
            outputs: HashMap::new(),
            registrations: Vec::new(),
        }
    }

    /// Dispatcher wired with the dashboard's two handlers.
    pub fn dashboard(ctx: AppContext) -> Self {
        let mut dispatcher = Self::new(ctx);
        dispatcher.register(
            "year_selector_disabled",
            &[InputSlot::ReportType],
            OutputSlot::YearSelectorDisabled,
            |_, sel| {
                Update::Replace(OutputValue::Disabled(super::year_selector_disabled(
                    sel.report,
                )))
            },
        );
        dispatcher.register(
            "render_report",
            &[InputSlot::ReportType, InputSlot::Year],
            OutputSlot::ReportOutput,
            |ctx, sel| super::render_report(ctx, sel).map(OutputValue::Report),
        );
        dispatcher
    }

    pub fn register<F>(
        &mut self,
        name: &'static str,
        watches: &[InputSlot],
        output: OutputSlot,
        handler: F,
    ) where
        F: Fn(&AppContext, &Selection) -> Update<OutputValue> + 'static,
    {
        self.registrations.push(Registration {
            name,
            watches: watches.to_vec(),
            output,
            handler: Box::new(handler),
        });
    }

    /// Initial pass: every handler runs once against the initial inputs.
    pub fn start(&mut self) -> Vec<OutputSlot> {
        let changed = self.run_where(|_| true);
        info!(?changed, "dispatcher started");
        changed
    }

    pub fn set_report_type(&mut self, report: Option<ReportKind>) -> Vec<OutputSlot> {
        if self.selection.report == report {
            return Vec::new();
        }
        self.selection.report = report;
        self.fire(InputSlot::ReportType)
    }

    pub fn set_year(&mut self, year: Option<i32>) -> Vec<OutputSlot> {
        if self.selection.year == year {
            return Vec::new();
        }
        self.selection.year = year;
        self.fire(InputSlot::Year)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn output(&self, slot: OutputSlot) -> Option<&OutputValue> {
        self.outputs.get(&slot)
    }

    /// Disabled until a handler says otherwise.
    pub fn year_selector_disabled(&self) -> bool {
        match self.output(OutputSlot::YearSelectorDisabled) {
            Some(OutputValue::Disabled(flag)) => *flag,
            _ => true,
        }
    }

    /// Charts currently in the output region, if any have been rendered.
    pub fn report(&self) -> Option<&ReportView> {
        match self.output(OutputSlot::ReportOutput) {
            Some(OutputValue::Report(view)) => Some(view),
            _ => None,
        }
    }

    fn fire(&mut self, slot: InputSlot) -> Vec<OutputSlot> {
        let changed = self.run_where(|reg| reg.watches.contains(&slot));
        info!(
            ?slot,
            report = ?self.selection.report,
            year = ?self.selection.year,
            ?changed,
            "input changed"
        );
        changed
    }

    fn run_where(&mut self, pred: impl Fn(&Registration) -> bool) -> Vec<OutputSlot> {
        let mut changed = Vec::new();
        for reg in self.registrations.iter().filter(|reg| pred(reg)) {
            match (reg.handler)(&self.ctx, &self.selection) {
                Update::NoUpdate => {
                    debug!(handler = reg.name, "no update");
                }
                Update::Replace(value) => {
                    if self.outputs.get(&reg.output) != Some(&value) {
                        changed.push(reg.output);
                    }
                    self.outputs.insert(reg.output, value);
                }
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::data::{DataSource, SalesTable};
    use crate::domain::{Month, SalesRecord};

    fn ctx() -> AppContext {
        let row = |year, recession, vehicle: &str, sales| SalesRecord {
            year,
            month: Month::Jan,
            recession,
            vehicle_type: vehicle.to_string(),
            automobile_sales: sales,
            advertising_expenditure: 1.0,
            unemployment_rate: 5.0,
        };
        AppContext::new(
            SalesTable::new(vec![
                row(1980, true, "Sports", 10.0),
                row(1981, false, "Sedan", 20.0),
            ]),
            DataSource::parse("fixture.csv"),
            Duration::ZERO,
        )
    }

    #[test]
    fn start_disables_year_and_leaves_output_empty() {
        let mut d = Dispatcher::dashboard(ctx());
        let changed = d.start();
        assert_eq!(changed, vec![OutputSlot::YearSelectorDisabled]);
        assert!(d.year_selector_disabled());
        assert!(d.report().is_none());
    }

    #[test]
    fn report_type_toggles_year_selector() {
        let mut d = Dispatcher::dashboard(ctx());
        d.start();
        d.set_report_type(Some(ReportKind::Yearly));
        assert!(!d.year_selector_disabled());
        d.set_report_type(Some(ReportKind::Recession));
        assert!(d.year_selector_disabled());
        d.set_report_type(None);
        assert!(d.year_selector_disabled());
    }

    #[test]
    fn no_update_keeps_previous_output() {
        let mut d = Dispatcher::dashboard(ctx());
        d.start();
        d.set_report_type(Some(ReportKind::Recession));
        let shown = d.report().cloned().expect("recession view rendered");

        // Yearly without a year: selector flips, charts stay.
        let changed = d.set_report_type(Some(ReportKind::Yearly));
        assert_eq!(changed, vec![OutputSlot::YearSelectorDisabled]);
        assert_eq!(d.report(), Some(&shown));

        let changed = d.set_year(Some(1981));
        assert_eq!(changed, vec![OutputSlot::ReportOutput]);
        let view = d.report().expect("yearly view");
        assert_eq!(view.kind, ReportKind::Yearly);
        assert_eq!(view.year, Some(1981));

        // Clearing the year keeps the 1981 view on screen.
        d.set_year(None);
        assert_eq!(d.report().and_then(|v| v.year), Some(1981));
    }

    #[test]
    fn disabling_does_not_clear_year() {
        let mut d = Dispatcher::dashboard(ctx());
        d.start();
        d.set_report_type(Some(ReportKind::Yearly));
        d.set_year(Some(1980));
        d.set_report_type(Some(ReportKind::Recession));
        assert_eq!(d.selection().year, Some(1980));
        assert_eq!(d.report().map(|v| v.kind), Some(ReportKind::Recession));
    }

    #[test]
    fn only_watching_handlers_run_and_unchanged_values_run_nothing() {
        let calls = Rc::new(Cell::new(0usize));
        let mut d = Dispatcher::new(ctx());
        let counter = Rc::clone(&calls);
        d.register(
            "count",
            &[InputSlot::ReportType],
            OutputSlot::YearSelectorDisabled,
            move |_, _| {
                counter.set(counter.get() + 1);
                Update::NoUpdate
            },
        );

        d.start();
        assert_eq!(calls.get(), 1);

        d.set_year(Some(1990));
        assert_eq!(calls.get(), 1, "year slot is not watched");

        d.set_report_type(Some(ReportKind::Yearly));
        assert_eq!(calls.get(), 2);

        d.set_report_type(Some(ReportKind::Yearly));
        assert_eq!(calls.get(), 2, "same value does not fire");
        assert!(d.output(OutputSlot::YearSelectorDisabled).is_none());
    }
}
