//! Plotters-powered chart panel for Ratatui.
//!
//! Line, bar and grouped-bar charts are drawn with Plotters into the Ratatui
//! buffer via `plotters-ratatui-backend`. Pie charts are drawn as a share table
//! with proportional bars: terminal cells are too coarse for wedges.

use plotters::prelude::*;
use plotters::style::Color as PlotColor;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::charts::{Chart, ChartKind};

/// High-contrast palette for terminal rendering; series cycle through it.
const PALETTE: [(u8, u8, u8); 8] = [
    (0, 255, 255),
    (255, 200, 0),
    (0, 255, 0),
    (255, 80, 80),
    (200, 120, 255),
    (255, 255, 255),
    (80, 160, 255),
    (255, 140, 200),
];

fn palette(idx: usize) -> (u8, u8, u8) {
    PALETTE[idx % PALETTE.len()]
}

/// Render-only view of one chart.
pub struct ChartPanel<'a> {
    pub chart: &'a Chart,
}

impl Widget for ChartPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.chart.is_empty() {
            buf.set_string(
                area.x,
                area.y,
                "No data for this selection.",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        match self.chart.kind {
            ChartKind::Pie => render_shares(self.chart, area, buf),
            _ => render_cartesian(self.chart, area, buf),
        }
    }
}

/// Pre-computed drawing instructions for a cartesian chart.
///
/// All series and bounds are computed outside the render call so `render()`
/// stays focused on drawing and the layout math can be tested on its own.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlotData {
    /// `(points, palette index, draw markers)`
    pub lines: Vec<(Vec<(f64, f64)>, usize, bool)>,
    /// `(x0, x1, height, palette index)`
    pub bars: Vec<(f64, f64, f64, usize)>,
    /// Tick positions and their labels.
    pub ticks: Vec<(f64, String)>,
    /// Series names for the legend (grouped bars only).
    pub legend: Vec<(String, usize)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

pub(crate) fn plot_data(chart: &Chart) -> PlotData {
    let mut data = PlotData {
        lines: Vec::new(),
        bars: Vec::new(),
        ticks: Vec::new(),
        legend: Vec::new(),
        x_bounds: [0.0, 1.0],
        y_bounds: [0.0, 1.0],
    };

    match chart.kind {
        ChartKind::Line { markers } => {
            for (idx, series) in chart.series.iter().enumerate() {
                let mut pts: Vec<(f64, f64)> = series
                    .points
                    .iter()
                    .filter(|p| p.y.is_finite())
                    .map(|p| (p.x, p.y))
                    .collect();
                pts.sort_by(|a, b| a.0.total_cmp(&b.0));
                data.lines.push((pts, idx, markers));
            }
            data.ticks = chart.x_keys();
            let (lo, hi) = min_max(data.ticks.iter().map(|(x, _)| *x)).unwrap_or((0.0, 1.0));
            data.x_bounds = if hi > lo {
                let pad = (hi - lo) * 0.02;
                [lo - pad, hi + pad]
            } else {
                [lo - 1.0, hi + 1.0]
            };
        }
        ChartKind::Bar => {
            for (idx, p) in chart.points().enumerate() {
                if p.y.is_finite() {
                    data.bars.push((p.x - 0.35, p.x + 0.35, p.y, idx));
                }
                data.ticks.push((p.x, p.label.clone()));
            }
            data.x_bounds = [-0.5, data.ticks.len().max(1) as f64 - 0.5];
        }
        ChartKind::GroupedBar => {
            let keys = chart.x_keys();
            let n_series = chart.series.len().max(1);
            let width = 0.8 / n_series as f64;
            for (s_idx, series) in chart.series.iter().enumerate() {
                data.legend.push((series.name.clone(), s_idx));
                for p in series.points.iter().filter(|p| p.y.is_finite()) {
                    let Some(slot) = keys.iter().position(|(x, _)| *x == p.x) else {
                        continue;
                    };
                    let x0 = slot as f64 - 0.4 + s_idx as f64 * width;
                    data.bars.push((x0, x0 + width, p.y, s_idx));
                }
            }
            data.ticks = keys
                .into_iter()
                .enumerate()
                .map(|(slot, (_, label))| (slot as f64, label))
                .collect();
            data.x_bounds = [-0.5, data.ticks.len().max(1) as f64 - 0.5];
        }
        ChartKind::Pie => {}
    }

    let ys = data
        .lines
        .iter()
        .flat_map(|(pts, _, _)| pts.iter().map(|(_, y)| *y))
        .chain(data.bars.iter().map(|(_, _, y, _)| *y));
    let (mut y_min, mut y_max) = min_max(ys).unwrap_or((0.0, 1.0));
    if !data.bars.is_empty() {
        // Bars grow from zero.
        y_min = y_min.min(0.0);
        y_max = y_max.max(0.0);
    }
    if y_max <= y_min {
        y_max = y_min + 1.0;
    }
    let pad = (y_max - y_min) * 0.05;
    let y_lo = if data.bars.is_empty() { y_min - pad } else { y_min };
    data.y_bounds = [y_lo, y_max + pad];

    data
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Label for the tick nearest `v`, if one is close enough.
fn tick_label(ticks: &[(f64, String)], v: f64) -> String {
    ticks
        .iter()
        .find(|(x, _)| (x - v).abs() < 0.25)
        .map(|(_, label)| label.clone())
        .unwrap_or_default()
}

/// Compact y tick labels for narrow label areas.
pub(crate) fn fmt_compact(v: f64) -> String {
    let abs = v.abs();
    if abs >= 1e6 {
        format!("{:.1}M", v / 1e6)
    } else if abs >= 1e4 {
        format!("{:.0}k", v / 1e3)
    } else if abs >= 1e3 {
        format!("{:.1}k", v / 1e3)
    } else {
        format!("{v:.0}")
    }
}

fn render_cartesian(chart: &Chart, area: Rect, buf: &mut Buffer) {
    let data = plot_data(chart);

    let mut plot_area = area;
    if !data.legend.is_empty() && area.height > 1 {
        let spans: Vec<Span> = data
            .legend
            .iter()
            .flat_map(|(name, idx)| {
                let (r, g, b) = palette(*idx);
                [
                    Span::styled("■ ", Style::default().fg(Color::Rgb(r, g, b))),
                    Span::raw(format!("{name}  ")),
                ]
            })
            .collect();
        Paragraph::new(Line::from(spans)).render(Rect { height: 1, ..area }, buf);
        plot_area = Rect {
            y: area.y + 1,
            height: area.height - 1,
            ..area
        };
    }

    // When the available area is too small, Plotters may fail to build a chart.
    // In that case, we render a small hint rather than panicking.
    if plot_area.width < 20 || plot_area.height < 8 {
        buf.set_string(
            plot_area.x,
            plot_area.y,
            "Chart area too small (resize terminal).",
            Style::default().fg(Color::Yellow),
        );
        return;
    }

    let [x0, x1] = data.x_bounds;
    let [y0, y1] = data.y_bounds;
    let x_desc = chart.x_label.clone();
    let y_desc = chart.y_label.clone();

    let widget = widget_fn(move |root| {
        let mut plot = ChartBuilder::on(&root)
            .margin(1)
            .set_label_area_size(LabelAreaPosition::Left, 7)
            .set_label_area_size(LabelAreaPosition::Bottom, 3)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        // Mesh lines are too noisy at terminal resolution.
        plot.configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(x_desc.as_str())
            .y_desc(y_desc.as_str())
            .x_labels(data.ticks.len().clamp(2, 8))
            .y_labels(5)
            .x_label_formatter(&|v| tick_label(&data.ticks, *v))
            .y_label_formatter(&|v| fmt_compact(*v))
            .label_style(("sans-serif", 10).into_font().color(&WHITE))
            .axis_style(&WHITE)
            .bold_line_style(&WHITE)
            .draw()?;

        for (x0, x1, y, idx) in &data.bars {
            let (r, g, b) = palette(*idx);
            plot.draw_series(std::iter::once(Rectangle::new(
                [(*x0, 0.0), (*x1, *y)],
                RGBColor(r, g, b).filled(),
            )))?;
        }

        for (pts, idx, markers) in &data.lines {
            let (r, g, b) = palette(*idx);
            let color = RGBColor(r, g, b);
            plot.draw_series(LineSeries::new(pts.iter().copied(), &color))?;
            if *markers {
                // `Circle` radii come out huge through the ratatui backend, so
                // markers are single highlighted pixels.
                plot.draw_series(pts.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;
            }
        }

        Ok(())
    });

    widget.render(plot_area, buf);
}

fn render_shares(chart: &Chart, area: Rect, buf: &mut Buffer) {
    let shares = chart.shares();
    let label_width = shares
        .iter()
        .map(|(label, _, _)| label.chars().count())
        .max()
        .unwrap_or(0)
        .min(18);
    // label + " " + bar + " " + "100.0%"
    let bar_width = (area.width as usize).saturating_sub(label_width + 9).max(1);

    let lines: Vec<Line> = shares
        .iter()
        .enumerate()
        .map(|(idx, (label, _, share))| {
            let (r, g, b) = palette(idx);
            let filled = ((share * bar_width as f64).round() as usize).min(bar_width);
            let name: String = label.chars().take(label_width).collect();
            Line::from(vec![
                Span::raw(format!("{name:<label_width$} ")),
                Span::styled("█".repeat(filled), Style::default().fg(Color::Rgb(r, g, b))),
                Span::raw(" ".repeat(bar_width - filled)),
                Span::styled(format!(" {:>5.1}%", share * 100.0), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    Paragraph::new(lines).render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{Point, Series};

    fn series(name: &str, points: &[(&str, f64, f64)]) -> Series {
        Series {
            name: name.to_string(),
            points: points
                .iter()
                .map(|(label, x, y)| Point {
                    label: label.to_string(),
                    x: *x,
                    y: *y,
                })
                .collect(),
        }
    }

    fn chart(kind: ChartKind, series: Vec<Series>) -> Chart {
        Chart {
            title: "t".to_string(),
            kind,
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            series,
        }
    }

    #[test]
    fn line_bounds_cover_keys_and_values() {
        let c = chart(
            ChartKind::Line { markers: true },
            vec![series("s", &[("1981", 1981.0, 20.0), ("1980", 1980.0, 10.0)])],
        );
        let data = plot_data(&c);
        assert_eq!(data.lines.len(), 1);
        assert_eq!(data.lines[0].0, vec![(1980.0, 10.0), (1981.0, 20.0)]);
        assert!(data.lines[0].2);
        assert!(data.x_bounds[0] < 1980.0 && data.x_bounds[1] > 1981.0);
        assert!(data.y_bounds[0] < 10.0 && data.y_bounds[1] > 20.0);
    }

    #[test]
    fn single_point_line_gets_a_usable_range() {
        let c = chart(ChartKind::Line { markers: false }, vec![series("s", &[("Jan", 1.0, 5.0)])]);
        let data = plot_data(&c);
        assert_eq!(data.x_bounds, [0.0, 2.0]);
        assert!(data.y_bounds[1] > data.y_bounds[0]);
    }

    #[test]
    fn bars_start_at_zero_and_sit_on_categories() {
        let c = chart(ChartKind::Bar, vec![series("s", &[("a", 0.0, 5.0), ("b", 1.0, 7.0)])]);
        let data = plot_data(&c);
        assert_eq!(data.bars.len(), 2);
        assert_eq!(data.y_bounds[0], 0.0);
        assert_eq!(data.x_bounds, [-0.5, 1.5]);
        let (x0, x1, y, _) = data.bars[1];
        assert!(x0 < 1.0 && x1 > 1.0);
        assert_eq!(y, 7.0);
        assert_eq!(tick_label(&data.ticks, 1.0), "b");
        assert_eq!(tick_label(&data.ticks, 0.5), "");
    }

    #[test]
    fn grouped_bars_share_slots_without_overlap() {
        let c = chart(
            ChartKind::GroupedBar,
            vec![
                series("a", &[("2.1", 2.1, 1.0), ("5.4", 5.4, 2.0)]),
                series("b", &[("5.4", 5.4, 3.0)]),
            ],
        );
        let data = plot_data(&c);
        assert_eq!(data.ticks, vec![(0.0, "2.1".to_string()), (1.0, "5.4".to_string())]);
        assert_eq!(data.legend.len(), 2);

        let slot1: Vec<_> = data.bars.iter().filter(|b| b.0 > 0.5).collect();
        assert_eq!(slot1.len(), 2);
        assert!(slot1[0].1 <= slot1[1].0 + 1e-12);
    }

    #[test]
    fn compact_numbers() {
        assert_eq!(fmt_compact(950.0), "950");
        assert_eq!(fmt_compact(2500.0), "2.5k");
        assert_eq!(fmt_compact(45_000.0), "45k");
        assert_eq!(fmt_compact(3_200_000.0), "3.2M");
    }

    #[test]
    fn share_panel_renders_labels_and_percentages() {
        let c = chart(
            ChartKind::Pie,
            vec![series("s", &[("Sports", 0.0, 1.0), ("Sedan", 1.0, 3.0)])],
        );
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        ChartPanel { chart: &c }.render(area, &mut buf);
        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Sports"));
        assert!(text.contains("75.0%"));
        assert!(text.contains("25.0%"));
    }

    #[test]
    fn empty_chart_renders_hint() {
        let c = chart(ChartKind::Bar, vec![series("s", &[])]);
        let area = Rect::new(0, 0, 40, 2);
        let mut buf = Buffer::empty(area);
        ChartPanel { chart: &c }.render(area, &mut buf);
        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("No data"));
    }
}
