//! The two report views: which aggregates go into which chart.

use crate::aggregate;
use crate::charts::{Chart, ChartKind, Point, ReportView, Series};
use crate::data::SalesTable;
use crate::domain::ReportKind;

const COL_YEAR: &str = "Year";
const COL_MONTH: &str = "Month";
const COL_VEHICLE: &str = "Vehicle_Type";
const COL_SALES: &str = "Automobile_Sales";
const COL_ADVERTISING: &str = "Advertising_Expenditure";

/// Charts for "Recession Period Statistics". Only rows with `Recession == 1`
/// contribute.
pub fn recession_report(table: &SalesTable) -> ReportView {
    let rows = table.recession_rows();

    let by_year = Chart {
        title: "Average automobile sales over year during recession period".to_string(),
        kind: ChartKind::Line { markers: true },
        x_label: COL_YEAR.to_string(),
        y_label: COL_SALES.to_string(),
        series: vec![year_series(aggregate::mean_sales_by_year(rows.clone()))],
    };

    let by_vehicle = Chart {
        title: "Average automobile sales by each vehicle types during recession period".to_string(),
        kind: ChartKind::Bar,
        x_label: COL_VEHICLE.to_string(),
        y_label: COL_SALES.to_string(),
        series: vec![category_series(COL_SALES, aggregate::mean_sales_by_vehicle(rows.clone()))],
    };

    let advertising = Chart {
        title: "Total advertising expenditure by each vehicle types during recession period"
            .to_string(),
        kind: ChartKind::Pie,
        x_label: String::new(),
        y_label: String::new(),
        series: vec![category_series(
            COL_ADVERTISING,
            aggregate::total_advertising_by_vehicle(rows.clone()),
        )],
    };

    let unemployment = Chart {
        title: "Effect of Unemployment Rate on Vehicle Type and Sales".to_string(),
        kind: ChartKind::GroupedBar,
        x_label: "Unemployment Rate".to_string(),
        y_label: "Average Automobile Sales".to_string(),
        series: unemployment_series(aggregate::mean_sales_by_unemployment_and_vehicle(rows)),
    };

    ReportView {
        kind: ReportKind::Recession,
        year: None,
        rows: [[by_year, by_vehicle], [advertising, unemployment]],
    }
}

/// Charts for "Yearly Statistics" in `year`.
///
/// The first chart is computed over the whole table, not the selected year;
/// the other three use only rows from `year`.
pub fn yearly_report(table: &SalesTable, year: i32) -> ReportView {
    let by_year = Chart {
        title: "Average Automobile sales yearly".to_string(),
        kind: ChartKind::Line { markers: false },
        x_label: COL_YEAR.to_string(),
        y_label: COL_SALES.to_string(),
        series: vec![year_series(aggregate::mean_sales_by_year(table.rows()))],
    };

    let rows = table.rows_for_year(year);

    let monthly = Chart {
        title: "Total Monthly Automobile Sales".to_string(),
        kind: ChartKind::Line { markers: false },
        x_label: COL_MONTH.to_string(),
        y_label: COL_SALES.to_string(),
        series: vec![Series {
            name: COL_SALES.to_string(),
            points: aggregate::total_sales_by_month(rows.clone())
                .into_iter()
                .map(|(month, y)| Point {
                    label: month.to_string(),
                    x: f64::from(month.number()),
                    y,
                })
                .collect(),
        }],
    };

    let by_vehicle = Chart {
        title: format!("Average Vehicles Sold by Vehicle Type in the year {year}"),
        kind: ChartKind::Bar,
        x_label: COL_VEHICLE.to_string(),
        y_label: COL_SALES.to_string(),
        series: vec![category_series(COL_SALES, aggregate::mean_sales_by_vehicle(rows.clone()))],
    };

    let advertising = Chart {
        title: "Total Advertisment Expenditure for Each Vehicle".to_string(),
        kind: ChartKind::Pie,
        x_label: String::new(),
        y_label: String::new(),
        series: vec![category_series(
            COL_ADVERTISING,
            aggregate::total_advertising_by_vehicle(rows),
        )],
    };

    ReportView {
        kind: ReportKind::Yearly,
        year: Some(year),
        rows: [[by_year, monthly], [by_vehicle, advertising]],
    }
}

fn year_series(groups: Vec<(i32, f64)>) -> Series {
    Series {
        name: COL_SALES.to_string(),
        points: groups
            .into_iter()
            .map(|(year, y)| Point {
                label: year.to_string(),
                x: f64::from(year),
                y,
            })
            .collect(),
    }
}

/// Categorical keys are placed at 0, 1, 2, ... in key order.
fn category_series(name: &str, groups: Vec<(String, f64)>) -> Series {
    Series {
        name: name.to_string(),
        points: groups
            .into_iter()
            .enumerate()
            .map(|(idx, (label, y))| Point {
                label,
                x: idx as f64,
                y,
            })
            .collect(),
    }
}

/// One series per vehicle type (ascending), each with points at its rates.
fn unemployment_series(groups: Vec<((f64, String), f64)>) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();
    for ((rate, vehicle), y) in groups {
        let point = Point {
            label: format!("{rate}"),
            x: rate,
            y,
        };
        match series.iter_mut().find(|s| s.name == vehicle) {
            Some(existing) => existing.points.push(point),
            None => series.push(Series {
                name: vehicle,
                points: vec![point],
            }),
        }
    }
    series.sort_by(|a, b| a.name.cmp(&b.name));
    series
}
