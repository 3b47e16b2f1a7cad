//! Batch gradient descent over the polynomial coefficients.

use nalgebra::DVector;

use crate::engine::model::PolynomialModel;
use crate::engine::points::PointSet;
use crate::math::fill_power_row;

/// One-step batch gradient descent.
///
/// Owns the learning rate (set through a log-scale control) and the count of
/// update steps actually applied. The point set and the model are passed in
/// per step so the engine never holds stale references to either.
#[derive(Debug, Clone)]
pub struct GradientDescentEngine {
    learning_rate: f64,
    iteration_count: u64,
}

impl GradientDescentEngine {
    pub fn new() -> Self {
        Self {
            learning_rate: 1.0,
            iteration_count: 0,
        }
    }

    /// Set the learning rate from a log₁₀ exponent: `α = 10^exponent`.
    ///
    /// A finite exponent is a precondition of the caller (the boundary
    /// exposes this as a slider-style control).
    pub fn set_learning_rate_exponent(&mut self, exponent: f64) {
        self.learning_rate = 10f64.powf(exponent);
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn iteration_count(&self) -> u64 {
        self.iteration_count
    }

    pub fn reset_iteration_count(&mut self) {
        self.iteration_count = 0;
    }

    /// Apply one synchronous batch update and return the updated model.
    ///
    /// For each power `j`, the partial derivative is
    /// `grad_j = Σᵢ (y(xᵢ) − yᵢ) · xᵢ^j / N`, with every term evaluated
    /// against the same pre-update coefficient snapshot. The update is
    /// simultaneous: `θ' = θ − α·grad`, never coordinate-wise.
    ///
    /// Returns `None` on an empty point set; the model and the iteration
    /// count are then unchanged.
    pub fn step(&mut self, points: &PointSet, model: &PolynomialModel) -> Option<PolynomialModel> {
        if points.is_empty() {
            return None;
        }

        let n = points.len() as f64;
        let len = model.coefficients().len();
        let mut grad = DVector::<f64>::zeros(len);
        let mut row = vec![0.0; len];

        for p in points.iter() {
            // `model` is untouched for the whole pass, so every residual and
            // every power term sees the same snapshot.
            let residual = model.evaluate(p.x) - p.y;
            fill_power_row(p.x, &mut row);
            for (g, basis) in grad.iter_mut().zip(row.iter()) {
                *g += residual * basis;
            }
        }
        grad /= n;

        let theta = DVector::from_column_slice(model.coefficients());
        let next = theta - grad * self.learning_rate;

        self.iteration_count += 1;
        Some(PolynomialModel::from_update(next.iter().copied().collect()))
    }
}

impl Default for GradientDescentEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;
    use crate::engine::cost::cost;

    fn point_set(points: &[(f64, f64)]) -> PointSet {
        let mut set = PointSet::new();
        for &(x, y) in points {
            set.push(Point::new(x, y));
        }
        set
    }

    #[test]
    fn step_on_empty_set_is_a_no_op() {
        let mut engine = GradientDescentEngine::new();
        let points = PointSet::new();
        let model = PolynomialModel::zeroed(3);
        assert!(engine.step(&points, &model).is_none());
        assert_eq!(engine.iteration_count(), 0);
    }

    #[test]
    fn symmetric_line_step_is_exact() {
        // degree 1, points (−1,−1) and (1,1), θ = [0,0], α = 0.1:
        // grad₀ = 0 by symmetry; grad₁ = ((0−(−1))·(−1) + (0−1)·1)/2 = −1,
        // so θ = [0, 0 − 0.1·(−1)] = [0, 0.1] exactly.
        let mut engine = GradientDescentEngine::new();
        engine.set_learning_rate_exponent(-1.0);
        let points = point_set(&[(-1.0, -1.0), (1.0, 1.0)]);
        let model = PolynomialModel::zeroed(1);

        assert!((cost(&points, &model).unwrap() - 0.5).abs() < 1e-12);

        let next = engine.step(&points, &model).unwrap();
        let thetas = next.coefficients();
        assert!(thetas[0].abs() < 1e-15, "θ₀ should stay 0, got {}", thetas[0]);
        assert!(
            (thetas[1] - 0.1).abs() < 1e-15,
            "θ₁ should be exactly 0.1, got {}",
            thetas[1]
        );
        assert_eq!(engine.iteration_count(), 1);
    }

    #[test]
    fn update_is_simultaneous_not_coordinate_wise() {
        // Single point (1, 1), θ = [0,0], α = 0.1. Both partials use the
        // pre-update residual −1, so both coefficients move to 0.1. A
        // sequential update would see residual −0.9 for θ₁ and land on 0.09.
        let mut engine = GradientDescentEngine::new();
        engine.set_learning_rate_exponent(-1.0);
        let points = point_set(&[(1.0, 1.0)]);
        let model = PolynomialModel::zeroed(1);

        let next = engine.step(&points, &model).unwrap();
        assert!((next.coefficients()[0] - 0.1).abs() < 1e-15);
        assert!((next.coefficients()[1] - 0.1).abs() < 1e-15);
    }

    #[test]
    fn learning_rate_is_log_scaled() {
        let mut engine = GradientDescentEngine::new();
        assert!((engine.learning_rate() - 1.0).abs() < 1e-15);
        engine.set_learning_rate_exponent(-2.0);
        assert!((engine.learning_rate() - 0.01).abs() < 1e-15);
        engine.set_learning_rate_exponent(0.5);
        assert!((engine.learning_rate() - 10f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn repeated_steps_do_not_increase_cost_for_small_rate() {
        let mut engine = GradientDescentEngine::new();
        engine.set_learning_rate_exponent(-1.0);
        let points = point_set(&[(-0.9, -0.5), (-0.3, 0.1), (0.2, 0.0), (0.7, 0.6)]);
        let mut model = PolynomialModel::zeroed(2);

        let mut prev = cost(&points, &model).unwrap();
        for _ in 0..50 {
            model = engine.step(&points, &model).unwrap();
            let next = cost(&points, &model).unwrap();
            assert!(
                next <= prev + 1e-12,
                "cost increased: {prev} -> {next} at iteration {}",
                engine.iteration_count()
            );
            prev = next;
        }
    }
}
