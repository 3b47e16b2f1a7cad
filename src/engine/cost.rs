//! Fit cost: mean squared error over 2N.

use crate::engine::model::PolynomialModel;
use crate::engine::points::PointSet;

/// Compute `Σ (y(xᵢ) − yᵢ)² / (2N)`.
///
/// Returns `None` for an empty point set: the cost is undefined there, and
/// callers check before formatting rather than displaying a NaN or a fake
/// zero.
pub fn cost(points: &PointSet, model: &PolynomialModel) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let sse: f64 = points
        .iter()
        .map(|p| {
            let r = model.evaluate(p.x) - p.y;
            r * r
        })
        .sum();
    Some(sse / (2.0 * n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;

    #[test]
    fn cost_is_undefined_on_empty_set() {
        let points = PointSet::new();
        let model = PolynomialModel::zeroed(3);
        assert_eq!(cost(&points, &model), None);
    }

    #[test]
    fn cost_of_zero_model_on_symmetric_points() {
        // degree 1, θ = [0, 0], points (−1,−1) and (1,1):
        // residuals are ±1, so cost = (1 + 1) / (2·2) = 0.5.
        let mut points = PointSet::new();
        points.push(Point::new(-1.0, -1.0));
        points.push(Point::new(1.0, 1.0));
        let model = PolynomialModel::zeroed(1);
        let c = cost(&points, &model).unwrap();
        assert!((c - 0.5).abs() < 1e-12, "expected 0.5, got {c}");
    }

    #[test]
    fn cost_is_zero_for_exact_fit() {
        let model = PolynomialModel::try_from_coefficients(vec![0.25, -0.5]).unwrap();
        let mut points = PointSet::new();
        for &x in &[-0.8, -0.1, 0.4, 0.9] {
            points.push(Point::new(x, model.evaluate(x)));
        }
        let c = cost(&points, &model).unwrap();
        assert!(c.abs() < 1e-15);
    }
}
