//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while fitting
//! - exported to JSON
//! - reloaded later for plotting

use serde::{Deserialize, Serialize};

/// Default proximity radius (model units) for toggling points.
///
/// Matches a click radius of 1/40th of the visible square on a canvas that
/// spans `[-1, 1]` in both axes.
pub const DEFAULT_POINT_RADIUS: f64 = 0.05;

/// Default auto-iteration tick interval in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 50;

/// A single observation in model (unit) coordinates.
///
/// Conversion from pixel/cell space is the renderer's job; the engine only
/// ever sees model coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `(x, y)`.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        ((self.x - x).powi(2) + (self.y - y).powi(2)).sqrt()
    }
}

/// Read-only snapshot of the full fit state.
///
/// Front-ends and exporters consume this instead of reaching into the engine,
/// so a snapshot taken before rendering stays consistent even if the state
/// changes afterwards.
#[derive(Debug, Clone)]
pub struct FitSnapshot {
    pub coefficients: Vec<f64>,
    pub degree: usize,
    /// `None` when the point set is empty (cost is undefined, not zero).
    pub cost: Option<f64>,
    pub learning_rate: f64,
    pub iteration_count: u64,
    pub manual_step_count: u64,
    pub points: Vec<Point>,
}

/// Configuration for synthetic sample generation.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub count: usize,
    pub seed: u64,
    /// Standard deviation of the Gaussian noise added to the target curve.
    pub noise_sigma: f64,
    pub x_min: f64,
    pub x_max: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            count: 30,
            seed: 42,
            noise_sigma: 0.05,
            x_min: -1.0,
            x_max: 1.0,
        }
    }
}

/// A saved fit file (JSON).
///
/// This is a report artifact: it records what was fitted, not resumable
/// engine state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub degree: usize,
    pub coefficients: Vec<f64>,
    pub learning_rate: f64,
    pub iteration_count: u64,
    pub cost: Option<f64>,
    pub points: Vec<Point>,
    pub grid: CurveGrid,
}

/// Precomputed fitted-curve samples for quick plotting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}
