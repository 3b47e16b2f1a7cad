//! The polynomial model: a coefficient vector ordered by increasing power.

use crate::error::FitError;
use crate::math::horner;

/// Highest supported polynomial degree.
pub const MAX_DEGREE: usize = 100;

/// Maximum coefficient count (`MAX_DEGREE + 1`).
pub const MAX_COEFFICIENTS: usize = MAX_DEGREE + 1;

/// A polynomial `y(x) = θ₀ + θ₁x + … + θ_d x^d`.
///
/// Invariant: the coefficient vector is never empty and never longer than
/// `MAX_COEFFICIENTS`. The model is replaced wholesale on degree changes and
/// manual overrides rather than mutated in place, so a reference taken before
/// an update keeps observing the pre-update coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialModel {
    thetas: Vec<f64>,
}

impl PolynomialModel {
    /// An all-zero model of the given degree, clamped to `[0, MAX_DEGREE]`.
    pub fn zeroed(degree: usize) -> Self {
        let degree = degree.min(MAX_DEGREE);
        Self {
            thetas: vec![0.0; degree + 1],
        }
    }

    /// Build a model from a validated coefficient vector.
    ///
    /// Rejects empty vectors, vectors longer than `MAX_COEFFICIENTS`, and
    /// non-finite entries. On failure the caller's current model is untouched
    /// (nothing is consumed but the argument).
    pub fn try_from_coefficients(thetas: Vec<f64>) -> Result<Self, FitError> {
        if thetas.is_empty() {
            return Err(FitError::EmptyCoefficientInput);
        }
        if thetas.len() > MAX_COEFFICIENTS {
            return Err(FitError::TooManyCoefficients {
                given: thetas.len(),
            });
        }
        if let Some(bad) = thetas.iter().find(|v| !v.is_finite()) {
            return Err(FitError::NonNumericCoefficient {
                token: bad.to_string(),
            });
        }
        Ok(Self { thetas })
    }

    /// Build a model from coefficients produced by the engine itself.
    ///
    /// The descent update preserves the length invariant by construction, so
    /// no validation happens here. Divergent runs may carry non-finite
    /// values, exactly as the iteration math produced them.
    pub(crate) fn from_update(thetas: Vec<f64>) -> Self {
        debug_assert!(!thetas.is_empty() && thetas.len() <= MAX_COEFFICIENTS);
        Self { thetas }
    }

    pub fn degree(&self) -> usize {
        self.thetas.len() - 1
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.thetas
    }

    /// Evaluate `y(x)`.
    pub fn evaluate(&self, x: f64) -> f64 {
        horner(x, &self.thetas)
    }
}

impl Default for PolynomialModel {
    fn default() -> Self {
        Self::zeroed(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_has_degree_plus_one_coefficients() {
        for degree in [0, 1, 5, 100] {
            let model = PolynomialModel::zeroed(degree);
            assert_eq!(model.coefficients().len(), degree + 1);
            assert_eq!(model.degree(), degree);
            assert!(model.coefficients().iter().all(|&t| t == 0.0));
        }
    }

    #[test]
    fn zeroed_clamps_oversized_degree() {
        let model = PolynomialModel::zeroed(150);
        assert_eq!(model.degree(), 100);
        assert_eq!(model.coefficients().len(), 101);
    }

    #[test]
    fn evaluate_quadratic() {
        let model = PolynomialModel::try_from_coefficients(vec![1.0, -2.0, 3.0]).unwrap();
        // 1 - 2·2 + 3·4 = 9
        assert!((model.evaluate(2.0) - 9.0).abs() < 1e-12);
        assert!((model.evaluate(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn try_from_rejects_empty() {
        assert_eq!(
            PolynomialModel::try_from_coefficients(vec![]),
            Err(FitError::EmptyCoefficientInput)
        );
    }

    #[test]
    fn try_from_rejects_oversized() {
        let err = PolynomialModel::try_from_coefficients(vec![0.0; 102]).unwrap_err();
        assert_eq!(err, FitError::TooManyCoefficients { given: 102 });
    }

    #[test]
    fn try_from_rejects_non_finite() {
        let err = PolynomialModel::try_from_coefficients(vec![1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, FitError::NonNumericCoefficient { .. }));
    }

    #[test]
    fn try_from_accepts_max_length() {
        let model = PolynomialModel::try_from_coefficients(vec![0.5; 101]).unwrap();
        assert_eq!(model.degree(), 100);
    }
}
