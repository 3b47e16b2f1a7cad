//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a finished fit:
//! - the coefficient vector and fit diagnostics
//! - the observed points
//! - a precomputed evaluation grid for quick plotting
//!
//! It is a report artifact, not resumable engine state; the engine itself is
//! in-memory only. The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{CurveFile, CurveGrid, FitSnapshot};
use crate::error::AppError;
use crate::math::horner;

/// Evaluation-grid sample count for exported curves.
const GRID_SAMPLES: usize = 101;

/// Write a curve JSON file from a fit snapshot.
pub fn write_curve_json(path: &Path, snapshot: &FitSnapshot) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create curve JSON '{}': {e}", path.display()),
        )
    })?;

    let curve = curve_file_from_snapshot(snapshot);
    serde_json::to_writer_pretty(file, &curve)
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open curve JSON '{}': {e}", path.display()),
        )
    })?;
    let curve: CurveFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}

/// Build the exportable representation of a snapshot.
pub fn curve_file_from_snapshot(snapshot: &FitSnapshot) -> CurveFile {
    let (x, y) = build_grid(&snapshot.coefficients, -1.0, 1.0, GRID_SAMPLES);
    CurveFile {
        tool: "gradfit".to_string(),
        degree: snapshot.degree,
        coefficients: snapshot.coefficients.clone(),
        learning_rate: snapshot.learning_rate,
        iteration_count: snapshot.iteration_count,
        cost: snapshot.cost,
        points: snapshot.points.clone(),
        grid: CurveGrid { x, y },
    }
}

fn build_grid(coefficients: &[f64], x_min: f64, x_max: f64, n: usize) -> (Vec<f64>, Vec<f64>) {
    let n = n.max(2);
    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x_min + u * (x_max - x_min);
        xs.push(x);
        ys.push(horner(x, coefficients));
    }
    (xs, ys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;

    fn snapshot() -> FitSnapshot {
        FitSnapshot {
            coefficients: vec![0.5, -1.0, 0.25],
            degree: 2,
            cost: Some(0.01),
            learning_rate: 0.1,
            iteration_count: 40,
            manual_step_count: 2,
            points: vec![Point::new(-0.5, 0.9), Point::new(0.5, 0.1)],
        }
    }

    #[test]
    fn grid_covers_the_unit_interval() {
        let curve = curve_file_from_snapshot(&snapshot());
        assert_eq!(curve.grid.x.len(), GRID_SAMPLES);
        assert_eq!(curve.grid.y.len(), GRID_SAMPLES);
        assert!((curve.grid.x[0] + 1.0).abs() < 1e-12);
        assert!((curve.grid.x[GRID_SAMPLES - 1] - 1.0).abs() < 1e-12);

        // Grid values are the polynomial evaluated at the grid x's.
        let mid = GRID_SAMPLES / 2;
        let expected = horner(curve.grid.x[mid], &curve.coefficients);
        assert!((curve.grid.y[mid] - expected).abs() < 1e-12);
    }

    #[test]
    fn curve_file_carries_fit_state() {
        let curve = curve_file_from_snapshot(&snapshot());
        assert_eq!(curve.tool, "gradfit");
        assert_eq!(curve.degree, 2);
        assert_eq!(curve.coefficients, vec![0.5, -1.0, 0.25]);
        assert_eq!(curve.iteration_count, 40);
        assert_eq!(curve.points.len(), 2);
    }

    #[test]
    fn json_round_trip_preserves_the_curve() {
        let path = std::env::temp_dir().join(format!(
            "gradfit-curve-test-{}.json",
            std::process::id()
        ));
        write_curve_json(&path, &snapshot()).unwrap();
        let loaded = read_curve_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.coefficients, vec![0.5, -1.0, 0.25]);
        assert_eq!(loaded.cost, Some(0.01));
        assert_eq!(loaded.points.len(), 2);
    }
}
