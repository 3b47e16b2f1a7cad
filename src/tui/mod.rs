//! Ratatui-based terminal UI.
//!
//! The TUI is the lab bench: a cursor moves over the model-space square
//! `[-1, 1]²`, Space toggles a data point, and the fit iterates manually or
//! on an auto tick while the chart, cost, and coefficient readouts update.
//!
//! The engine defines what a tick does; this event loop is the periodic
//! scheduler that drives it, using the `event::poll` timeout as the timer.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::cli::TuiArgs;
use crate::data::generate_sample;
use crate::domain::SampleConfig;
use crate::engine::controller::parse_coefficient_list;
use crate::engine::{FitController, PolynomialModel, ToggleOutcome};
use crate::error::AppError;
use crate::report::format_polynomial;

mod plotters_chart;

use plotters_chart::FitChart;

/// Cursor movement per arrow-key press, in model units.
const CURSOR_STEP: f64 = 0.05;

/// Learning-rate exponent change per bracket-key press.
const ALPHA_EXP_STEP: f64 = 0.25;

/// Poll timeout while auto-iteration is idle.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    // Build the app (and surface argument errors) before touching the
    // terminal, so failures print on a normal screen.
    let mut app = App::new(args)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

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
    controller: FitController,
    tick: Duration,
    last_tick: Instant,
    cursor_x: f64,
    cursor_y: f64,
    alpha_exp: f64,
    editing_coeffs: bool,
    coeffs_input: String,
    status: String,
}

impl App {
    fn new(args: TuiArgs) -> Result<Self, AppError> {
        if !args.alpha_exp.is_finite() {
            return Err(AppError::new(2, "Learning-rate exponent must be finite."));
        }
        if args.tick_ms == 0 {
            return Err(AppError::new(2, "Tick interval must be > 0 ms."));
        }

        let mut controller = FitController::new(args.degree);
        controller.set_learning_rate_exponent(args.alpha_exp);

        if args.sample_count > 0 {
            let target =
                PolynomialModel::try_from_coefficients(parse_coefficient_list(&args.target)?)?;
            let config = SampleConfig {
                count: args.sample_count,
                seed: args.seed,
                noise_sigma: args.noise,
                x_min: -1.0,
                x_max: 1.0,
            };
            let points = generate_sample(&target, &config)?;
            controller.load_points(&points);
        }

        Ok(Self {
            controller,
            tick: Duration::from_millis(args.tick_ms),
            last_tick: Instant::now(),
            cursor_x: 0.0,
            cursor_y: 0.0,
            alpha_exp: args.alpha_exp,
            editing_coeffs: false,
            coeffs_input: String::new(),
            status: "Space toggles a point at the cursor.".to_string(),
        })
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
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if event::poll(self.poll_timeout())
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))?
                {
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

            self.pump_auto();
            if self.controller.take_changes().any() {
                needs_redraw = true;
            }
        }
        Ok(())
    }

    /// Sleep until the next event or the next due auto tick.
    fn poll_timeout(&self) -> Duration {
        match self.controller.auto_interval() {
            Some(interval) => interval.saturating_sub(self.last_tick.elapsed()).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    /// Apply an auto tick if one is due.
    fn pump_auto(&mut self) {
        let Some(interval) = self.controller.auto_interval() else {
            return;
        };
        if self.last_tick.elapsed() >= interval {
            self.controller.tick();
            self.last_tick = Instant::now();
        }
    }

    /// Returns `true` when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_coeffs {
            self.handle_coeffs_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Left => self.move_cursor(-CURSOR_STEP, 0.0),
            KeyCode::Right => self.move_cursor(CURSOR_STEP, 0.0),
            KeyCode::Up => self.move_cursor(0.0, CURSOR_STEP),
            KeyCode::Down => self.move_cursor(0.0, -CURSOR_STEP),
            KeyCode::Char(' ') => {
                let outcome = self
                    .controller
                    .add_or_remove_point(self.cursor_x, self.cursor_y);
                self.status = match outcome {
                    ToggleOutcome::Added => {
                        format!("Added point ({:.2}, {:.2}).", self.cursor_x, self.cursor_y)
                    }
                    ToggleOutcome::Removed => {
                        format!("Removed point near ({:.2}, {:.2}).", self.cursor_x, self.cursor_y)
                    }
                };
            }
            KeyCode::Char('s') => {
                if self.controller.manual_step() {
                    self.status = format!("Step {} applied.", self.controller.iteration_count());
                } else {
                    self.status = "No points to fit.".to_string();
                }
            }
            KeyCode::Char('a') => {
                if self.controller.is_auto_running() {
                    self.controller.stop_auto();
                    self.status = "Auto iteration stopped.".to_string();
                } else {
                    self.controller.start_auto(self.tick);
                    self.last_tick = Instant::now();
                    self.status = format!("Auto iteration every {}ms.", self.tick.as_millis());
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.controller.set_degree(self.controller.degree() + 1);
                self.status = format!("Degree: {}.", self.controller.degree());
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                let degree = self.controller.degree();
                if degree > 0 {
                    self.controller.set_degree(degree - 1);
                }
                self.status = format!("Degree: {}.", self.controller.degree());
            }
            KeyCode::Char('[') => self.adjust_alpha_exp(-ALPHA_EXP_STEP),
            KeyCode::Char(']') => self.adjust_alpha_exp(ALPHA_EXP_STEP),
            KeyCode::Char('e') => {
                self.editing_coeffs = true;
                self.coeffs_input.clear();
                self.status =
                    "Editing coefficients (comma-separated). Enter to apply, Esc to cancel."
                        .to_string();
            }
            KeyCode::Char('r') => {
                self.controller.reset_coefficients();
                self.status = "Coefficients and counters reset.".to_string();
            }
            KeyCode::Char('c') => {
                self.controller.clear_points();
                self.status = "Points cleared; fit reset.".to_string();
            }
            _ => {}
        }

        false
    }

    fn handle_coeffs_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_coeffs = false;
                self.status = "Coefficient edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_coeffs = false;
                match self.controller.set_coefficients_manually(&self.coeffs_input) {
                    Ok(()) => {
                        self.status = format!(
                            "Polynomial set: degree {} ({} coefficients).",
                            self.controller.degree(),
                            self.controller.coefficients().len()
                        );
                    }
                    Err(err) => {
                        self.status = err.to_string();
                    }
                }
            }
            KeyCode::Backspace => {
                self.coeffs_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | ',' | 'e' | 'E' | ' ') {
                    self.coeffs_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, dx: f64, dy: f64) {
        self.cursor_x = (self.cursor_x + dx).clamp(-1.0, 1.0);
        self.cursor_y = (self.cursor_y + dy).clamp(-1.0, 1.0);
    }

    fn adjust_alpha_exp(&mut self, delta: f64) {
        self.alpha_exp += delta;
        self.controller.set_learning_rate_exponent(self.alpha_exp);
        self.status = format!(
            "Learning rate: {:.4} (10^{:.2}).",
            self.controller.learning_rate(),
            self.alpha_exp
        );
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("gradfit", Style::default().fg(Color::Cyan)),
            Span::raw(" — polynomial fitting by batch gradient descent"),
        ]));

        let auto_label = if self.controller.is_auto_running() {
            format!("on ({}ms)", self.tick.as_millis())
        } else {
            "off".to_string()
        };
        lines.push(Line::from(Span::styled(
            format!(
                "degree: {} | alpha: {:.4} (10^{:.2}) | points: {} | auto: {auto_label}",
                self.controller.degree(),
                self.controller.learning_rate(),
                self.alpha_exp,
                self.controller.points().len(),
            ),
            Style::default().fg(Color::Gray),
        )));

        let cost_label = match self.controller.cost() {
            Some(cost) => format!("{cost:.6}"),
            None => "-".to_string(),
        };
        lines.push(Line::from(Span::styled(
            format!(
                "cost: {cost_label} | iterations: {} total | {} manual",
                self.controller.iteration_count(),
                self.controller.manual_step_count(),
            ),
            Style::default().fg(Color::Gray),
        )));

        lines.push(Line::from(Span::styled(
            format!("y(x) = {}", format_polynomial(self.controller.coefficients())),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Fit").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let (curve, points, x_bounds, y_bounds) = self.chart_series();
        let widget = FitChart {
            curve: &curve,
            points: &points,
            cursor: (self.cursor_x, self.cursor_y),
            x_bounds,
            y_bounds,
            x_label: "x",
            y_label: "y",
        };

        frame.render_widget(widget, inner);
    }

    /// Build chart series for Plotters.
    fn chart_series(&self) -> (Vec<(f64, f64)>, Vec<(f64, f64)>, [f64; 2], [f64; 2]) {
        let x_bounds = [-1.05, 1.05];

        let points: Vec<(f64, f64)> = self
            .controller
            .points()
            .iter()
            .map(|p| (p.x, p.y))
            .collect();

        let n = 200usize;
        let mut curve = Vec::with_capacity(n);
        for i in 0..n {
            let u = i as f64 / (n as f64 - 1.0);
            let x = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
            let y = self.controller.evaluate(x);
            if y.is_finite() {
                curve.push((x, y));
            }
        }

        // The canvas square always stays visible; widen only if data or the
        // curve runs past it.
        let (mut y_min, mut y_max) = (-1.05, 1.05_f64);
        for &(_, y) in points.iter().chain(curve.iter()) {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
            y_min = -1.05;
            y_max = 1.05;
        }
        // Keep runaway fits from flattening the view entirely.
        y_min = y_min.max(-20.0);
        y_max = y_max.min(20.0);

        (curve, points, x_bounds, [y_min, y_max])
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = if self.editing_coeffs {
            Line::from(vec![
                Span::styled("coefficients: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{}▏", self.coeffs_input),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  (Enter apply, Esc cancel)"),
            ])
        } else {
            let help = "←↑↓→ cursor  Space point  s step  a auto  +/- degree  [/] alpha  e coeffs  r reset  c clear  q quit";
            Line::from(vec![
                Span::styled(help, Style::default().fg(Color::Gray)),
                Span::raw(" | "),
                Span::styled(&self.status, Style::default().fg(Color::Yellow)),
            ])
        };
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
