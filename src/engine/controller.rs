//! The orchestration boundary consumed by front-ends.
//!
//! `FitController` owns the point set, the model, the descent engine, and the
//! auto-iteration state machine. All mutations go through it, and it records
//! *which* facets of the state changed in a typed `ChangeSet` so presentation
//! code can redraw selectively instead of dispatching on string keys.

use std::time::Duration;

use crate::domain::{DEFAULT_POINT_RADIUS, FitSnapshot, Point};
use crate::engine::auto::AutoIterate;
use crate::engine::cost::cost;
use crate::engine::descent::GradientDescentEngine;
use crate::engine::model::{MAX_COEFFICIENTS, PolynomialModel};
use crate::engine::points::{PointSet, ToggleOutcome};
use crate::error::FitError;

/// Which facets of the fit state changed since the host last drained.
///
/// Mutating controller operations merge into a pending set; the host takes it
/// with [`FitController::take_changes`] and decides what to refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub points: bool,
    pub coefficients: bool,
    pub cost: bool,
    pub counters: bool,
    pub degree: bool,
    pub learning_rate: bool,
    pub auto: bool,
}

impl ChangeSet {
    pub fn any(&self) -> bool {
        self.points
            || self.coefficients
            || self.cost
            || self.counters
            || self.degree
            || self.learning_rate
            || self.auto
    }
}

/// Orchestrates manual/auto stepping, coefficient overrides, and resets.
///
/// This is the only type external callers touch; the component types stay
/// internal so every mutation funnels through one place.
#[derive(Debug, Clone)]
pub struct FitController {
    points: PointSet,
    model: PolynomialModel,
    engine: GradientDescentEngine,
    auto: AutoIterate,
    manual_step_count: u64,
    point_radius: f64,
    pending: ChangeSet,
}

impl FitController {
    /// A controller with an all-zero model of the given degree.
    pub fn new(degree: usize) -> Self {
        Self {
            points: PointSet::new(),
            model: PolynomialModel::zeroed(degree),
            engine: GradientDescentEngine::new(),
            auto: AutoIterate::new(),
            manual_step_count: 0,
            point_radius: DEFAULT_POINT_RADIUS,
            pending: ChangeSet::default(),
        }
    }

    /// Override the proximity radius used by [`add_or_remove_point`].
    ///
    /// [`add_or_remove_point`]: FitController::add_or_remove_point
    pub fn set_point_radius(&mut self, radius: f64) {
        self.point_radius = radius;
    }

    // --- point edits ---------------------------------------------------

    /// Toggle a point at `(x, y)` in model coordinates.
    pub fn add_or_remove_point(&mut self, x: f64, y: f64) -> ToggleOutcome {
        let outcome = self.points.toggle(x, y, self.point_radius);
        self.pending.points = true;
        self.pending.cost = true;
        outcome
    }

    /// Append points without proximity checks (sample loading).
    pub fn load_points(&mut self, points: &[Point]) {
        for &p in points {
            self.points.push(p);
        }
        self.pending.points = true;
        self.pending.cost = true;
    }

    /// Empty the point set; stops auto-iteration and resets coefficients and
    /// both counters, like an explicit reset.
    pub fn clear_points(&mut self) {
        self.points.clear();
        self.pending.points = true;
        self.reset_coefficients();
    }

    // --- stepping ------------------------------------------------------

    /// One batch update without touching the manual counter (auto ticks and
    /// scripted iteration). Returns whether a step was actually applied.
    pub fn step(&mut self) -> bool {
        match self.engine.step(&self.points, &self.model) {
            Some(next) => {
                self.model = next;
                self.pending.coefficients = true;
                self.pending.cost = true;
                self.pending.counters = true;
                true
            }
            None => false,
        }
    }

    /// One explicitly user-triggered step.
    pub fn manual_step(&mut self) -> bool {
        let stepped = self.step();
        if stepped {
            self.manual_step_count += 1;
        }
        stepped
    }

    /// Apply a scheduled tick: steps only while auto-iteration is running.
    ///
    /// The host may deliver a tick that was already in flight when
    /// [`stop_auto`] ran; it lands here as a no-op, which is what makes
    /// cancellation synchronous.
    ///
    /// [`stop_auto`]: FitController::stop_auto
    pub fn tick(&mut self) -> bool {
        if !self.auto.is_running() {
            return false;
        }
        self.step()
    }

    pub fn start_auto(&mut self, tick: Duration) {
        if !self.auto.is_running() {
            self.auto.start(tick);
            self.pending.auto = true;
        }
    }

    pub fn stop_auto(&mut self) {
        if self.auto.is_running() {
            self.auto.stop();
            self.pending.auto = true;
        }
    }

    pub fn is_auto_running(&self) -> bool {
        self.auto.is_running()
    }

    /// The tick interval while auto-iteration is running.
    pub fn auto_interval(&self) -> Option<Duration> {
        self.auto.interval()
    }

    // --- model edits ---------------------------------------------------

    /// Zero the coefficients (degree preserved), stop auto-iteration, and
    /// reset both counters.
    pub fn reset_coefficients(&mut self) {
        self.model = PolynomialModel::zeroed(self.model.degree());
        self.stop_auto();
        self.engine.reset_iteration_count();
        self.manual_step_count = 0;
        self.pending.coefficients = true;
        self.pending.cost = true;
        self.pending.counters = true;
    }

    /// Replace the model with a zero vector of the given degree (clamped to
    /// `[0, 100]`). Counters and the auto state are deliberately untouched.
    pub fn set_degree(&mut self, degree: usize) {
        self.model = PolynomialModel::zeroed(degree);
        self.pending.degree = true;
        self.pending.coefficients = true;
        self.pending.cost = true;
    }

    pub fn set_learning_rate_exponent(&mut self, exponent: f64) {
        self.engine.set_learning_rate_exponent(exponent);
        self.pending.learning_rate = true;
    }

    /// Parse and apply a comma-separated coefficient list.
    ///
    /// A manual override is a fresh start: both counters reset on success.
    /// On failure the model, counters, and auto state are all unchanged.
    pub fn set_coefficients_manually(&mut self, text: &str) -> Result<(), FitError> {
        let thetas = parse_coefficient_list(text)?;
        self.model = PolynomialModel::try_from_coefficients(thetas)?;
        self.engine.reset_iteration_count();
        self.manual_step_count = 0;
        self.pending.degree = true;
        self.pending.coefficients = true;
        self.pending.cost = true;
        self.pending.counters = true;
        Ok(())
    }

    // --- read accessors ------------------------------------------------

    pub fn coefficients(&self) -> &[f64] {
        self.model.coefficients()
    }

    pub fn degree(&self) -> usize {
        self.model.degree()
    }

    /// `None` while the point set is empty.
    pub fn cost(&self) -> Option<f64> {
        cost(&self.points, &self.model)
    }

    pub fn learning_rate(&self) -> f64 {
        self.engine.learning_rate()
    }

    pub fn iteration_count(&self) -> u64 {
        self.engine.iteration_count()
    }

    pub fn manual_step_count(&self) -> u64 {
        self.manual_step_count
    }

    pub fn points(&self) -> &[Point] {
        self.points.as_slice()
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.model.evaluate(x)
    }

    /// Take (and clear) the pending change notifications.
    pub fn take_changes(&mut self) -> ChangeSet {
        std::mem::take(&mut self.pending)
    }

    /// A consistent copy of the full fit state for reporting/export.
    pub fn snapshot(&self) -> FitSnapshot {
        FitSnapshot {
            coefficients: self.model.coefficients().to_vec(),
            degree: self.model.degree(),
            cost: self.cost(),
            learning_rate: self.engine.learning_rate(),
            iteration_count: self.engine.iteration_count(),
            manual_step_count: self.manual_step_count,
            points: self.points.as_slice().to_vec(),
        }
    }
}

/// Parse a comma-separated list of finite numbers.
///
/// Rejections, in order: empty input, more than [`MAX_COEFFICIENTS`] tokens,
/// any token that is not a finite number (including `inf`/`NaN`, which
/// `f64::from_str` would otherwise accept).
pub fn parse_coefficient_list(text: &str) -> Result<Vec<f64>, FitError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FitError::EmptyCoefficientInput);
    }

    let tokens: Vec<&str> = trimmed.split(',').map(str::trim).collect();
    if tokens.len() > MAX_COEFFICIENTS {
        return Err(FitError::TooManyCoefficients {
            given: tokens.len(),
        });
    }

    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token.parse::<f64>() {
            Ok(v) if v.is_finite() => out.push(v),
            _ => {
                return Err(FitError::NonNumericCoefficient {
                    token: token.to_string(),
                });
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(50);

    fn seeded_controller() -> FitController {
        let mut ctl = FitController::new(1);
        ctl.set_learning_rate_exponent(-1.0);
        ctl.add_or_remove_point(-1.0, -1.0);
        ctl.add_or_remove_point(1.0, 1.0);
        ctl
    }

    #[test]
    fn add_then_remove_round_trip() {
        let mut ctl = FitController::new(1);
        assert_eq!(ctl.add_or_remove_point(0.2, 0.3), ToggleOutcome::Added);
        assert_eq!(ctl.add_or_remove_point(0.2, 0.3), ToggleOutcome::Removed);
        assert!(ctl.points().is_empty());
    }

    #[test]
    fn manual_step_counts_both_counters() {
        let mut ctl = seeded_controller();
        assert!(ctl.manual_step());
        assert_eq!(ctl.iteration_count(), 1);
        assert_eq!(ctl.manual_step_count(), 1);

        // Scripted steps move only the iteration counter.
        assert!(ctl.step());
        assert_eq!(ctl.iteration_count(), 2);
        assert_eq!(ctl.manual_step_count(), 1);
    }

    #[test]
    fn manual_step_on_empty_set_changes_nothing() {
        let mut ctl = FitController::new(2);
        let before = ctl.coefficients().to_vec();
        assert!(!ctl.manual_step());
        assert_eq!(ctl.coefficients(), &before[..]);
        assert_eq!(ctl.iteration_count(), 0);
        assert_eq!(ctl.manual_step_count(), 0);
    }

    #[test]
    fn symmetric_line_step_through_controller() {
        let mut ctl = seeded_controller();
        assert!((ctl.cost().unwrap() - 0.5).abs() < 1e-12);
        ctl.manual_step();
        assert!(ctl.coefficients()[0].abs() < 1e-15);
        assert!((ctl.coefficients()[1] - 0.1).abs() < 1e-15);
    }

    #[test]
    fn tick_steps_only_while_running() {
        let mut ctl = seeded_controller();
        assert!(!ctl.tick());
        assert_eq!(ctl.iteration_count(), 0);

        ctl.start_auto(TICK);
        assert!(ctl.tick());
        assert_eq!(ctl.iteration_count(), 1);
        assert_eq!(ctl.manual_step_count(), 0);

        // A tick delivered after stop lands as a no-op.
        ctl.stop_auto();
        assert!(!ctl.tick());
        assert_eq!(ctl.iteration_count(), 1);
    }

    #[test]
    fn start_auto_is_idempotent() {
        let mut ctl = seeded_controller();
        ctl.start_auto(TICK);
        ctl.start_auto(Duration::from_millis(500));
        assert_eq!(ctl.auto_interval(), Some(TICK));
        ctl.stop_auto();
        ctl.stop_auto();
        assert!(!ctl.is_auto_running());
    }

    #[test]
    fn reset_coefficients_zeroes_state_and_stops_auto() {
        let mut ctl = seeded_controller();
        ctl.start_auto(TICK);
        for _ in 0..3 {
            ctl.manual_step();
        }
        assert!(ctl.coefficients().iter().any(|&t| t != 0.0));

        ctl.reset_coefficients();
        assert!(ctl.coefficients().iter().all(|&t| t == 0.0));
        assert_eq!(ctl.degree(), 1);
        assert_eq!(ctl.iteration_count(), 0);
        assert_eq!(ctl.manual_step_count(), 0);
        assert!(!ctl.is_auto_running());
    }

    #[test]
    fn clear_points_resets_like_reset_coefficients() {
        let mut ctl = seeded_controller();
        ctl.start_auto(TICK);
        ctl.manual_step();

        ctl.clear_points();
        assert!(ctl.points().is_empty());
        assert!(ctl.coefficients().iter().all(|&t| t == 0.0));
        assert_eq!(ctl.iteration_count(), 0);
        assert_eq!(ctl.manual_step_count(), 0);
        assert!(!ctl.is_auto_running());
        assert_eq!(ctl.cost(), None);
    }

    #[test]
    fn set_degree_preserves_counters_and_auto() {
        let mut ctl = seeded_controller();
        ctl.manual_step();
        ctl.start_auto(TICK);

        ctl.set_degree(4);
        assert_eq!(ctl.degree(), 4);
        assert_eq!(ctl.coefficients().len(), 5);
        assert!(ctl.coefficients().iter().all(|&t| t == 0.0));
        // Degree changes reset the fit, not the bookkeeping.
        assert_eq!(ctl.iteration_count(), 1);
        assert_eq!(ctl.manual_step_count(), 1);
        assert!(ctl.is_auto_running());
    }

    #[test]
    fn set_degree_clamps_at_100() {
        let mut ctl = FitController::new(1);
        ctl.set_degree(150);
        assert_eq!(ctl.degree(), 100);
        assert_eq!(ctl.coefficients().len(), 101);
    }

    #[test]
    fn manual_coefficients_replace_model_and_reset_counters() {
        let mut ctl = seeded_controller();
        ctl.manual_step();

        ctl.set_coefficients_manually(" 1.5, -0.25 , 0.75 ").unwrap();
        assert_eq!(ctl.coefficients(), &[1.5, -0.25, 0.75]);
        assert_eq!(ctl.degree(), 2);
        assert_eq!(ctl.iteration_count(), 0);
        assert_eq!(ctl.manual_step_count(), 0);
    }

    #[test]
    fn manual_coefficients_reject_empty_input() {
        let mut ctl = FitController::new(1);
        assert_eq!(
            ctl.set_coefficients_manually("   "),
            Err(FitError::EmptyCoefficientInput)
        );
    }

    #[test]
    fn manual_coefficients_reject_102_entries_unchanged() {
        let mut ctl = seeded_controller();
        ctl.manual_step();
        let before = ctl.coefficients().to_vec();

        let text = vec!["1"; 102].join(",");
        assert_eq!(
            ctl.set_coefficients_manually(&text),
            Err(FitError::TooManyCoefficients { given: 102 })
        );
        assert_eq!(ctl.coefficients(), &before[..]);
        assert_eq!(ctl.iteration_count(), 1);
        assert_eq!(ctl.manual_step_count(), 1);
    }

    #[test]
    fn manual_coefficients_reject_non_numeric_token() {
        let mut ctl = seeded_controller();
        let before = ctl.coefficients().to_vec();
        assert_eq!(
            ctl.set_coefficients_manually("1,2,abc"),
            Err(FitError::NonNumericCoefficient {
                token: "abc".to_string()
            })
        );
        assert_eq!(ctl.coefficients(), &before[..]);
    }

    #[test]
    fn manual_coefficients_reject_non_finite_token() {
        let mut ctl = FitController::new(1);
        assert!(matches!(
            ctl.set_coefficients_manually("1,inf"),
            Err(FitError::NonNumericCoefficient { .. })
        ));
    }

    #[test]
    fn change_notifications_mark_only_touched_facets() {
        let mut ctl = seeded_controller();
        ctl.take_changes();

        ctl.manual_step();
        let changes = ctl.take_changes();
        assert!(changes.coefficients && changes.cost && changes.counters);
        assert!(!changes.points && !changes.degree && !changes.learning_rate && !changes.auto);

        // Drained: nothing pending until the next mutation.
        assert!(!ctl.take_changes().any());

        ctl.set_learning_rate_exponent(-2.0);
        let changes = ctl.take_changes();
        assert!(changes.learning_rate);
        assert!(!changes.coefficients);
    }

    #[test]
    fn cost_decreases_under_auto_ticks() {
        let mut ctl = FitController::new(2);
        ctl.set_learning_rate_exponent(-1.0);
        ctl.add_or_remove_point(-0.8, -0.4);
        ctl.add_or_remove_point(-0.2, 0.2);
        ctl.add_or_remove_point(0.3, 0.1);
        ctl.add_or_remove_point(0.9, 0.7);
        ctl.start_auto(TICK);

        let mut prev = ctl.cost().unwrap();
        for _ in 0..100 {
            assert!(ctl.tick());
            let next = ctl.cost().unwrap();
            assert!(next <= prev + 1e-12, "cost increased: {prev} -> {next}");
            prev = next;
        }
    }

    #[test]
    fn snapshot_is_consistent_copy() {
        let mut ctl = seeded_controller();
        ctl.manual_step();
        let snap = ctl.snapshot();

        assert_eq!(snap.degree, ctl.degree());
        assert_eq!(snap.coefficients, ctl.coefficients());
        assert_eq!(snap.iteration_count, 1);
        assert_eq!(snap.manual_step_count, 1);
        assert_eq!(snap.points.len(), 2);

        // Later mutations do not retroactively change the snapshot.
        ctl.manual_step();
        assert_eq!(snap.iteration_count, 1);
    }
}
