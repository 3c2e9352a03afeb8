//! Ratatui-based terminal UI.
//!
//! The TUI renders the static dashboard page: the title, a settings panel
//! with the report-type and year dropdowns, and the 2×2 chart grid. Every
//! dropdown change goes through the dispatcher; the grid shows whatever the
//! dispatcher's output slot currently holds.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use tracing::{info, warn};

use crate::dashboard::layout::{self, Dropdown};
use crate::dashboard::{AppContext, Dispatcher, OutputSlot};
use crate::domain::ReportKind;
use crate::error::AppError;

mod chart_panel;

use chart_panel::ChartPanel;

const EXPORT_DIR: &str = "exports";

/// Start the TUI over an already-loaded context.
pub fn run(ctx: AppContext) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(ctx);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Settings panel rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Report,
    Year,
}

struct App {
    dispatcher: Dispatcher,
    report_dropdown: Dropdown<ReportKind>,
    year_dropdown: Dropdown<i32>,
    selected: Field,
    status: String,
    export_dir: PathBuf,
}

impl App {
    fn new(ctx: AppContext) -> Self {
        let mut dispatcher = Dispatcher::dashboard(ctx);
        dispatcher.start();
        Self {
            dispatcher,
            report_dropdown: layout::report_dropdown(),
            year_dropdown: layout::year_dropdown(),
            selected: Field::Report,
            status: "Select a report type.".to_string(),
            export_dir: PathBuf::from(EXPORT_DIR),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            let ready = event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?;
            if !ready {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        info!("tui exited");
        Ok(())
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::BackTab => self.selected = Field::Report,
            KeyCode::Down | KeyCode::Tab => self.selected = Field::Year,
            KeyCode::Left => self.step_field(-1),
            KeyCode::Right => self.step_field(1),
            KeyCode::PageUp => self.step_field(-10),
            KeyCode::PageDown => self.step_field(10),
            KeyCode::Backspace | KeyCode::Delete => self.clear_field(),
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
        false
    }

    fn step_field(&mut self, delta: i32) {
        match self.selected {
            Field::Report => {
                let current = self.dispatcher.selection().report;
                let next = self.report_dropdown.step(current, delta.signum());
                self.set_report(next);
            }
            Field::Year => {
                let current = self.dispatcher.selection().year;
                let next = self.year_dropdown.step(current, delta);
                self.set_year(next);
            }
        }
    }

    fn clear_field(&mut self) {
        match self.selected {
            Field::Report => self.set_report(None),
            Field::Year => self.set_year(None),
        }
    }

    fn set_report(&mut self, report: Option<ReportKind>) {
        let changed = self.dispatcher.set_report_type(report);
        self.status = match report {
            Some(kind) => format!("report: {kind}"),
            None => self.report_dropdown.placeholder.to_string(),
        };
        if report == Some(ReportKind::Yearly) && !changed.contains(&OutputSlot::ReportOutput) {
            self.status.push_str(" | pick a year to update the charts");
        }
    }

    fn set_year(&mut self, year: Option<i32>) {
        if self.dispatcher.year_selector_disabled() {
            self.status = "Year selector is disabled (only used by Yearly Statistics).".to_string();
            return;
        }
        self.dispatcher.set_year(year);
        self.status = match year {
            Some(y) => format!("year: {y}"),
            None => self.year_dropdown.placeholder.to_string(),
        };
    }

    fn export(&mut self) {
        let Some(view) = self.dispatcher.report() else {
            self.status = "Nothing to export yet.".to_string();
            return;
        };
        let path = crate::io::export::default_export_path(&self.export_dir, view);
        match crate::io::export::write_report_json(&path, view) {
            Ok(()) => self.status = format!("Exported {}", path.display()),
            Err(err) => {
                warn!(%err, "export failed");
                self.status = format!("Export failed: {err}");
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
        self.draw_grid(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let ctx = self.dispatcher.context();
        let stats = ctx.table.stats();
        let lines = vec![
            Line::from(Span::styled(
                layout::TITLE,
                Style::default().fg(Color::Rgb(0x50, 0x3D, 0x36)).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::from(Span::styled(
                format!(
                    "source: {} | rows: {} | years: {}–{} | loaded in {:.2}s",
                    ctx.source.display_name(),
                    stats.rows,
                    stats.year_min,
                    stats.year_max,
                    ctx.load_time.as_secs_f64(),
                ),
                Style::default().fg(Color::Gray),
            ))
            .alignment(Alignment::Center),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let selection = self.dispatcher.selection();
        let year_disabled = self.dispatcher.year_selector_disabled();

        let report_label = selection
            .report
            .map(|k| k.label().to_string())
            .unwrap_or_else(|| self.report_dropdown.placeholder.to_string());
        let year_label = selection
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| self.year_dropdown.placeholder.to_string());

        let year_style = if year_disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let items = vec![
            ListItem::new(format!("Report type: {report_label}")),
            ListItem::new(format!(
                "Year: {year_label}{}",
                if year_disabled { " (disabled)" } else { "" }
            ))
            .style(year_style),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(match self.selected {
            Field::Report => 0,
            Field::Year => 1,
        }));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_grid(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(view) = self.dispatcher.report() else {
            let msg = Paragraph::new(
                "Select a report type (and a year for yearly statistics) to display charts.",
            )
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(msg, area);
            return;
        };

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(1, layout::GRID_ROWS as u32); layout::GRID_ROWS])
            .split(area);

        for (row, row_area) in view.rows.iter().zip(row_areas.iter()) {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, layout::GRID_COLS as u32); layout::GRID_COLS])
                .split(*row_area);
            for (chart, cell) in row.iter().zip(cells.iter()) {
                let block = Block::default().title(chart.title.as_str()).borders(Borders::ALL);
                let inner = block.inner(*cell);
                frame.render_widget(block, *cell);
                frame.render_widget(Clear, inner);
                frame.render_widget(ChartPanel { chart }, inner);
            }
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ change  PgUp/PgDn ±10y  Del clear  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ratatui::backend::TestBackend;

    use super::*;
    use crate::data::{DataSource, SalesTable};
    use crate::domain::{Month, SalesRecord};

    fn app() -> App {
        let row = |year, recession| SalesRecord {
            year,
            month: Month::Jan,
            recession,
            vehicle_type: "Sports".to_string(),
            automobile_sales: 10.0,
            advertising_expenditure: 1.0,
            unemployment_rate: 5.0,
        };
        let ctx = AppContext::new(
            SalesTable::new(vec![row(1980, true), row(1981, false)]),
            DataSource::parse("fixture.csv"),
            Duration::ZERO,
        );
        App::new(ctx)
    }

    #[test]
    fn year_edits_are_refused_while_disabled() {
        let mut app = app();
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.dispatcher.selection().year, None);
        assert!(app.status.contains("disabled"));
    }

    #[test]
    fn yearly_flow_through_keys() {
        let mut app = app();
        app.handle_key(KeyCode::Right);
        assert_eq!(app.dispatcher.selection().report, Some(ReportKind::Yearly));
        assert!(app.dispatcher.report().is_none());

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.dispatcher.selection().year, Some(1980));
        assert_eq!(app.dispatcher.report().and_then(|v| v.year), Some(1980));

        app.handle_key(KeyCode::PageDown);
        assert_eq!(app.dispatcher.selection().year, Some(1990));

        app.handle_key(KeyCode::Delete);
        assert_eq!(app.dispatcher.selection().year, None);
        // Charts stay on the last rendered year.
        assert_eq!(app.dispatcher.report().and_then(|v| v.year), Some(1990));
    }

    #[test]
    fn recession_renders_and_quit_key_quits() {
        let mut app = app();
        app.handle_key(KeyCode::Left);
        assert_eq!(app.dispatcher.selection().report, Some(ReportKind::Recession));
        assert!(app.dispatcher.report().is_some());
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn export_without_charts_reports_status() {
        let mut app = app();
        app.handle_key(KeyCode::Char('e'));
        assert_eq!(app.status, "Nothing to export yet.");
    }

    #[test]
    fn export_writes_into_export_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.export_dir = dir.path().to_path_buf();
        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Char('e'));
        assert!(app.status.starts_with("Exported"), "{}", app.status);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn initial_screen_shows_title_and_placeholders() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Automobile Sales Statistics Dashboard"));
        assert!(text.contains("Select a report type"));
        assert!(text.contains("Select-year (disabled)"));
    }
}
