//! Power-basis polynomial primitives.
//!
//! The engine relies on two primitive operations:
//! - evaluate `y(x) = Σ θ_i x^i` given a coefficient slice (for predictions
//!   and residuals)
//! - fill a power-basis row `[1, x, x², …]` (for the per-power gradient sums)
//!
//! Evaluation uses Horner's method: one multiply-add per coefficient, and no
//! repeated `powi` calls. The power row is built incrementally for the same
//! reason.

/// Evaluate a polynomial with coefficients ordered by increasing power
/// (`c[0] + c[1]·x + c[2]·x² + …`).
pub fn horner(x: f64, coefficients: &[f64]) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| x.mul_add(acc, c))
}

/// Fill `out` with the power basis `[1, x, x², …]` at `x`.
///
/// # Panics
/// Panics if `out` is empty. Callers size the row to the coefficient count,
/// which is always at least 1.
pub fn fill_power_row(x: f64, out: &mut [f64]) {
    out[0] = 1.0;
    for i in 1..out.len() {
        out[i] = out[i - 1] * x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner_matches_naive_sum() {
        let coefficients = [0.5, -1.25, 2.0, 0.75];
        for &x in &[-1.0, -0.3, 0.0, 0.8, 1.0, 2.5] {
            let naive: f64 = coefficients
                .iter()
                .enumerate()
                .map(|(i, &c)| c * x.powi(i as i32))
                .sum();
            let fast = horner(x, &coefficients);
            assert!(
                (fast - naive).abs() < 1e-12,
                "x={x}: horner {fast} vs naive {naive}"
            );
        }
    }

    #[test]
    fn horner_constant_polynomial() {
        assert_eq!(horner(123.0, &[7.0]), 7.0);
    }

    #[test]
    fn power_row_increasing_powers() {
        let mut row = [0.0; 4];
        fill_power_row(2.0, &mut row);
        assert_eq!(row, [1.0, 2.0, 4.0, 8.0]);

        fill_power_row(0.0, &mut row);
        assert_eq!(row, [1.0, 0.0, 0.0, 0.0]);
    }
}
