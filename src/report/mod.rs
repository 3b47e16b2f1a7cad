//! Reporting utilities: residuals, worst-fit extremes, and formatted output.
//!
//! We keep formatting code in one place so:
//! - the engine stays clean and testable
//! - output changes are localized

use crate::domain::{FitSnapshot, Point};

/// A per-point fitted result.
#[derive(Debug, Clone)]
pub struct Residual {
    pub point: Point,
    pub y_fit: f64,
    pub residual: f64,
}

/// Points the fitted curve misses the most, split by side.
#[derive(Debug, Clone)]
pub struct Extremes {
    /// Largest positive residuals (points above the curve).
    pub above: Vec<Residual>,
    /// Largest negative residuals (points below the curve).
    pub below: Vec<Residual>,
}

/// Compute fitted values and residuals for each point in the snapshot.
pub fn compute_residuals(snapshot: &FitSnapshot) -> Vec<Residual> {
    snapshot
        .points
        .iter()
        .map(|&point| {
            let y_fit = crate::math::horner(point.x, &snapshot.coefficients);
            Residual {
                point,
                y_fit,
                residual: point.y - y_fit,
            }
        })
        .collect()
}

/// Rank the top-N points above and below the curve.
pub fn rank_extremes(residuals: &[Residual], top_n: usize) -> Extremes {
    let mut sorted = residuals.to_vec();
    sorted.sort_by(|a, b| {
        b.residual
            .partial_cmp(&a.residual)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let above = sorted
        .iter()
        .take(top_n)
        .filter(|r| r.residual > 0.0)
        .cloned()
        .collect();
    let below = sorted
        .iter()
        .rev()
        .take(top_n)
        .filter(|r| r.residual < 0.0)
        .cloned()
        .collect();

    Extremes { above, below }
}

/// Format the fitted polynomial as `θ₀ + θ₁ x + θ₂ x^2 + …` with 6-decimal
/// coefficients.
pub fn format_polynomial(coefficients: &[f64]) -> String {
    let mut out = String::new();
    for (i, theta) in coefficients.iter().enumerate() {
        match i {
            0 => out.push_str(&format!("{theta:.6}")),
            1 => out.push_str(&format!(" + {theta:.6} x")),
            _ => out.push_str(&format!(" + {theta:.6} x^{i}")),
        }
    }
    out
}

/// Format the full run summary (fit parameters + diagnostics).
pub fn format_run_summary(snapshot: &FitSnapshot) -> String {
    let mut out = String::new();

    out.push_str("=== gradfit - polynomial fit by batch gradient descent ===\n");
    out.push_str(&format!(
        "Degree: {} ({} coefficients)\n",
        snapshot.degree,
        snapshot.coefficients.len()
    ));
    out.push_str(&format!("Learning rate: {:.3}\n", snapshot.learning_rate));
    out.push_str(&format!(
        "Iterations: {} total | {} manual\n",
        snapshot.iteration_count, snapshot.manual_step_count
    ));
    out.push_str(&format!("Points: n={}\n", snapshot.points.len()));
    match snapshot.cost {
        Some(cost) => out.push_str(&format!("Cost: {cost:.6}\n")),
        None => out.push_str("Cost: undefined (no points)\n"),
    }
    out.push_str(&format!(
        "Fitting polynomial: {}\n",
        format_polynomial(&snapshot.coefficients)
    ));

    out
}

/// Format the worst-fit tables.
pub fn format_extremes(extremes: &Extremes) -> String {
    let mut out = String::new();

    out.push_str("Worst fit above the curve (positive residual):\n");
    out.push_str(&format_table(&extremes.above));
    out.push('\n');

    out.push_str("Worst fit below the curve (negative residual):\n");
    out.push_str(&format_table(&extremes.below));

    out
}

fn format_table(residuals: &[Residual]) -> String {
    if residuals.is_empty() {
        return "  (none)\n".to_string();
    }

    let mut out = String::new();
    out.push_str("  x          y          fit        residual\n");
    for r in residuals {
        out.push_str(&format!(
            "  {:<+10.4} {:<+10.4} {:<+10.4} {:<+10.4}\n",
            r.point.x, r.point.y, r.y_fit, r.residual
        ));
    }
    out
}
