//! Ratatui-based terminal form.
//!
//! The form has one temperature field and N gas rows. Each row shows the
//! selected gas and its heat capacity at the form temperature; the chart shows
//! the curve of the highlighted row's gas.

use std::io;
use std::sync::Arc;
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
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::app::session::{RowResult, Session, internal_errors};
use crate::data::TableCache;
use crate::domain::{Evaluation, FormConfig, GasPoints, ReferenceTable};
use crate::error::AppError;
use crate::report::{UNIT_LABEL, format_temperature};

mod plotters_chart;

use plotters_chart::GasPlottersChart;

/// Field index of the temperature input; gas rows follow it.
const TEMPERATURE_FIELD: usize = 0;

/// Start the TUI.
pub fn run(config: FormConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(&config);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
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

struct App {
    cache: TableCache,
    table: Arc<ReferenceTable>,
    load_error: Option<String>,
    session: Session,
    results: Vec<RowResult>,
    selected_field: usize,
    editing_temperature: bool,
    temperature_input: String,
    status: String,
}

impl App {
    fn new(config: &FormConfig) -> Self {
        let mut app = Self {
            cache: TableCache::new(config.data_path.clone()),
            table: Arc::new(ReferenceTable::empty()),
            load_error: None,
            session: Session::from_config(config),
            results: Vec::new(),
            selected_field: TEMPERATURE_FIELD,
            editing_temperature: false,
            temperature_input: String::new(),
            status: String::new(),
        };
        app.load_table(false);
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
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
        Ok(())
    }

    /// Returns `true` when the form should close.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_temperature {
            self.handle_temperature_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field < self.session.row_count() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => {
                if self.selected_field == TEMPERATURE_FIELD {
                    self.editing_temperature = true;
                    self.temperature_input = format_temperature(self.session.temperature);
                    self.status = "Editing temperature (°C). Enter to apply, Esc to cancel.".to_string();
                } else {
                    self.adjust_field(1);
                }
            }
            KeyCode::Char('c') => {
                if let Some(row) = self.selected_row() {
                    self.session.clear_row(row);
                    self.recompute();
                }
            }
            KeyCode::Char('R') => self.load_table(true),
            _ => {}
        }

        false
    }

    fn handle_temperature_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_temperature = false;
                self.status = "Temperature edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_temperature = false;
                self.apply_temperature_input();
            }
            KeyCode::Backspace => {
                self.temperature_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '-' || c == '.' {
                    self.temperature_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn apply_temperature_input(&mut self) {
        let trimmed = self.temperature_input.trim().to_string();
        match trimmed.parse::<f64>() {
            Ok(t) if t.is_finite() => {
                self.session.temperature = t;
                self.status = format!("temperature: {} °C", format_temperature(t));
                self.recompute();
            }
            _ => {
                self.status = format!("Invalid temperature '{trimmed}'.");
            }
        }
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.selected_row() {
            None => {
                self.session.step_temperature(delta);
                self.status = format!("temperature: {} °C", format_temperature(self.session.temperature));
            }
            Some(row) => {
                self.session.cycle_gas(row, delta, &self.table);
                self.status = format!("row {}: {}", row + 1, self.session.rows()[row]);
            }
        }
        self.recompute();
    }

    fn selected_row(&self) -> Option<usize> {
        self.selected_field.checked_sub(1)
    }

    /// Load (or explicitly reload) the table, degrading to an empty one on failure.
    fn load_table(&mut self, reload: bool) {
        if reload {
            self.cache.invalidate();
        }
        let (table, err) = self.cache.load_or_empty();
        self.table = table;
        self.load_error = err.map(|e| e.to_string());
        self.session.retain_known(&self.table);

        self.status = match &self.load_error {
            Some(msg) => format!("Gas data not loaded: {msg}"),
            None => format!(
                "{} {} gases from {}",
                if reload { "Reloaded" } else { "Loaded" },
                self.table.len(),
                self.cache.path().display()
            ),
        };
        self.recompute();
    }

    fn recompute(&mut self) {
        self.results = self.session.evaluate(&self.table);
        if let Some(bad) = internal_errors(&self.results).next() {
            self.status = format!(
                "Internal error: no bracketing points for '{}' at {} °C",
                bad.gas,
                format_temperature(bad.temperature)
            );
        }
    }

    /// Gas shown in the chart: the highlighted row, else the first selected row.
    fn chart_gas(&self) -> Option<&RowResult> {
        let highlighted = self
            .selected_row()
            .and_then(|row| self.results.get(row))
            .filter(|r| r.evaluation != Evaluation::NoSelection);
        highlighted.or_else(|| {
            self.results
                .iter()
                .find(|r| r.evaluation != Evaluation::NoSelection)
        })
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled("gascp", Style::default().fg(Color::Cyan)),
                Span::raw(" | Mean Molar Specific Heat Capacity of Ideal Gases"),
            ]),
            Line::from(Span::styled(
                format!(
                    "Between temperatures 0 °C and t °C | data: {} ({} gases)",
                    self.cache.path().display(),
                    self.table.len()
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(0)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(format!("Calculation ({UNIT_LABEL})"))
            .borders(Borders::ALL);

        if self.table.is_empty() {
            let msg = self
                .load_error
                .as_deref()
                .unwrap_or("The reference table has no gases.");
            let p = Paragraph::new(Text::from(vec![
                Line::from(Span::styled(
                    "Gas data not loaded.",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(msg.to_string()),
                Line::from("Press R to reload."),
            ]))
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(block);
            frame.render_widget(p, area);
            return;
        }

        let temperature_text = if self.editing_temperature {
            format!("{}▏", self.temperature_input)
        } else {
            format_temperature(self.session.temperature)
        };

        let mut items = Vec::with_capacity(self.results.len() + 1);
        items.push(ListItem::new(Line::from(vec![
            Span::raw("Temperature (°C): "),
            Span::styled(temperature_text, Style::default().add_modifier(Modifier::BOLD)),
        ])));
        for (idx, r) in self.results.iter().enumerate() {
            items.push(ListItem::new(Line::from(vec![
                Span::raw(format!("{:>2}. {:<14} ", idx + 1, r.gas)),
                Span::styled(r.evaluation.to_string(), evaluation_style(r.evaluation)),
            ])));
        }

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let row = self.chart_gas();
        let title = row.map(|r| format!("{} curve", r.gas)).unwrap_or_else(|| "Curve".to_string());
        let block = Block::default().title(title).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some((row, points)) = row.and_then(|r| self.table.get(&r.gas).map(|p| (r, p))) else {
            let msg = Paragraph::new("Select a gas to see its curve.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let Some(series) = chart_series(points, row) else {
            let msg = Paragraph::new("Not enough numeric points to draw a curve.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let (chart_rect, insets) = chart_layout(inner);
        let widget = GasPlottersChart {
            curve: &series.curve,
            points: &series.points,
            marker: series.marker,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: "t (°C)",
            y_label: UNIT_LABEL,
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, series.x_bounds, series.y_bounds);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit  c clear  R reload  q quit";
        let status_style = if self.load_error.is_some() || self.status.starts_with("Internal error") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, status_style),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn evaluation_style(evaluation: Evaluation) -> Style {
    match evaluation {
        Evaluation::Value(_) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        Evaluation::NoSelection => Style::default().fg(Color::DarkGray),
        Evaluation::NoData | Evaluation::NotApplicable | Evaluation::OutOfRange => {
            Style::default().fg(Color::Yellow)
        }
        Evaluation::InternalError => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

struct ChartSeries {
    curve: Vec<(f64, f64)>,
    points: Vec<(f64, f64)>,
    marker: Option<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build chart series for Plotters.
fn chart_series(points: &GasPoints, row: &RowResult) -> Option<ChartSeries> {
    let (lo, hi) = points.key_range()?;
    let curve = crate::interp::sample_curve(points, 200);
    let known = crate::interp::known_points(points);
    if curve.len() < 2 && known.len() < 2 {
        return None;
    }

    let mut x_bounds = [lo as f64, hi as f64];
    if x_bounds[1] <= x_bounds[0] {
        x_bounds = [x_bounds[0] - 1.0, x_bounds[1] + 1.0];
    }

    let marker = row.evaluation.value().map(|v| (row.temperature, v));

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in curve.iter().chain(&known).chain(marker.iter()) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        let mid = if y_min.is_finite() { y_min } else { 0.0 };
        y_min = mid - 0.5;
        y_max = mid + 0.5;
    }

    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    let y_bounds = [y_min - pad, y_max + pad];

    Some(ChartSeries {
        curve,
        points: known,
        marker,
        x_bounds,
        y_bounds,
    })
}

fn fmt_axis_x(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.1}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = fmt_axis_x(x_val);
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = fmt_axis_y(y_val);
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new("t (°C)")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new("cp")
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_table;

    #[test]
    fn chart_series_includes_marker_in_bounds() {
        let table = parse_table(r#"{"O2": {"0": 29.27, "100": 29.5}}"#).unwrap();
        let points = table.get("O2").unwrap();
        let row = RowResult {
            gas: "O2".to_string(),
            temperature: 50.0,
            evaluation: Evaluation::Value(29.385),
        };
        let series = chart_series(points, &row).unwrap();
        assert_eq!(series.x_bounds, [0.0, 100.0]);
        assert_eq!(series.marker, Some((50.0, 29.385)));
        assert!(series.y_bounds[0] < 29.27 && series.y_bounds[1] > 29.5);
        assert_eq!(series.points.len(), 2);
    }

    #[test]
    fn chart_series_needs_two_numeric_points() {
        let table = parse_table(r#"{"X": {"0": 1.0}}"#).unwrap();
        let row = RowResult {
            gas: "X".to_string(),
            temperature: 0.0,
            evaluation: Evaluation::Value(1.0),
        };
        assert!(chart_series(table.get("X").unwrap(), &row).is_none());
    }
}
