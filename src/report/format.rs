//! Plain-text rendering of a report view.
//!
//! We keep formatting code in one place so:
//! - the chart builders stay free of presentation concerns
//! - output changes are localized (important for future snapshot tests)

use crate::charts::{Chart, ChartKind, ReportView};
use crate::dashboard::AppContext;
use crate::dashboard::layout::TITLE;

const LABEL_WIDTH: usize = 24;

/// Header block: title, source, and what was loaded.
pub fn format_summary(ctx: &AppContext) -> String {
    let stats = ctx.table.stats();
    let mut out = String::new();
    out.push_str(&format!("=== {TITLE} ===\n"));
    out.push_str(&format!("Source: {}\n", ctx.source));
    out.push_str(&format!(
        "Rows: {} ({} in recession) | years=[{}, {}] | loaded in {:.2}s\n",
        stats.rows,
        stats.recession_rows,
        stats.year_min,
        stats.year_max,
        ctx.load_time.as_secs_f64(),
    ));
    out.push_str(&format!("Vehicle types: {}\n", stats.vehicle_types.join(", ")));
    out
}

/// All four charts, row by row.
pub fn format_report(view: &ReportView) -> String {
    let mut out = String::new();
    match view.year {
        Some(year) => out.push_str(&format!("Report: {} ({year})\n", view.kind)),
        None => out.push_str(&format!("Report: {}\n", view.kind)),
    }
    for (idx, chart) in view.charts().enumerate() {
        out.push('\n');
        out.push_str(&format!("[{}] {}\n", idx + 1, chart.title));
        out.push_str(&format_chart(chart));
    }
    out
}

fn format_chart(chart: &Chart) -> String {
    if chart.is_empty() {
        return "  (no data)\n".to_string();
    }

    let mut out = String::new();
    match chart.kind {
        ChartKind::Pie => {
            out.push_str(&header(&["label", "value", "share"]));
            for (label, value, share) in chart.shares() {
                out.push_str(&format!(
                    "{:<LABEL_WIDTH$} {:>14} {:>7.1}%\n",
                    truncate(&label, LABEL_WIDTH),
                    fmt_value(value),
                    share * 100.0
                ));
            }
        }
        ChartKind::GroupedBar => {
            for series in &chart.series {
                out.push_str(&format!("  {}:\n", series.name));
                out.push_str(&header(&[chart.x_label.as_str(), chart.y_label.as_str()]));
                for p in &series.points {
                    out.push_str(&row(&p.label, p.y));
                }
            }
        }
        ChartKind::Line { .. } | ChartKind::Bar => {
            out.push_str(&header(&[chart.x_label.as_str(), chart.y_label.as_str()]));
            for p in chart.points() {
                out.push_str(&row(&p.label, p.y));
            }
        }
    }
    out
}

fn header(cols: &[&str]) -> String {
    let mut line = format!("{:<LABEL_WIDTH$}", truncate(cols[0], LABEL_WIDTH));
    for col in &cols[1..] {
        line.push_str(&format!(" {:>14}", truncate(col, 24)));
    }
    let width = line.trim_end().chars().count();
    format!("{}\n{:-<width$}\n", line.trim_end(), "")
}

fn row(label: &str, value: f64) -> String {
    format!("{:<LABEL_WIDTH$} {:>14}\n", truncate(label, LABEL_WIDTH), fmt_value(value))
}

fn fmt_value(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.2}")
    } else {
        "-".to_string()
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{Point, Series};
    use crate::domain::ReportKind;

    fn chart(kind: ChartKind, points: &[(&str, f64)]) -> Chart {
        Chart {
            title: "title".to_string(),
            kind,
            x_label: "Vehicle_Type".to_string(),
            y_label: "Automobile_Sales".to_string(),
            series: vec![Series {
                name: "Automobile_Sales".to_string(),
                points: points
                    .iter()
                    .enumerate()
                    .map(|(i, (label, y))| Point {
                        label: label.to_string(),
                        x: i as f64,
                        y: *y,
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn report_lists_every_chart_with_values() {
        let view = ReportView {
            kind: ReportKind::Yearly,
            year: Some(1980),
            rows: [
                [
                    chart(ChartKind::Line { markers: false }, &[("1980", 10.0)]),
                    chart(ChartKind::Bar, &[]),
                ],
                [
                    chart(ChartKind::Bar, &[("Sports", 1.5)]),
                    chart(ChartKind::Pie, &[("a", 1.0), ("b", 3.0)]),
                ],
            ],
        };
        let text = format_report(&view);
        assert!(text.starts_with("Report: Yearly Statistics (1980)\n"));
        assert_eq!(text.matches("] title").count(), 4);
        assert!(text.contains("(no data)"));
        assert!(text.contains("1.50"));
        assert!(text.contains("75.0%"));
    }

    #[test]
    fn truncate_marks_cut_labels() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }

    #[test]
    fn non_finite_values_render_as_dash() {
        assert_eq!(fmt_value(f64::NAN), "-");
        assert_eq!(fmt_value(2.0), "2.00");
    }
}
