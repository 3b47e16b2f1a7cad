//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o`
//! - fitted curve: `-` line
//! - the zero axes: `.`

use crate::domain::{CurveFile, FitSnapshot, Point};
use crate::math::horner;

/// Render a plot for an in-memory fit snapshot.
pub fn render_ascii_plot(snapshot: &FitSnapshot, width: usize, height: usize) -> String {
    let (x_min, x_max) = x_range(&snapshot.points).unwrap_or((-1.0, 1.0));
    let curve = sample_curve(&snapshot.coefficients, x_min, x_max, width.max(2));
    render_plot(&snapshot.points, &curve, x_min, x_max, width, height)
}

/// Render a plot from a saved curve JSON file.
pub fn render_ascii_plot_from_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    let curve_points: Vec<(f64, f64)> = curve
        .grid
        .x
        .iter()
        .zip(curve.grid.y.iter())
        .map(|(&x, &y)| (x, y))
        .collect();

    let (x_min, x_max) = curve_x_range(&curve_points).unwrap_or((-1.0, 1.0));
    render_plot(&curve.points, &curve_points, x_min, x_max, width, height)
}

fn render_plot(
    points: &[Point],
    curve: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(points, curve).unwrap_or((-1.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    draw_axes(&mut grid, x_min, x_max, y_min, y_max);
    draw_curve(&mut grid, curve, x_min, x_max, y_min, y_max);

    // Points overlay the curve.
    for p in points {
        let x = map_x(p.x, x_min, x_max, width);
        let y = map_y(p.y, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn sample_curve(coefficients: &[f64], x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x_min + u * (x_max - x_min);
        out.push((x, horner(x, coefficients)));
    }
    out
}

fn x_range(points: &[Point]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn curve_x_range(curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in curve {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn y_range(points: &[Point], curve: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in points {
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    for &(_, y) in curve {
        if y.is_finite() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_axes(grid: &mut [Vec<char>], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    let height = grid.len();
    let width = grid[0].len();

    if y_min < 0.0 && y_max > 0.0 {
        let row = map_y(0.0, y_min, y_max, height);
        for cell in grid[row].iter_mut() {
            *cell = '.';
        }
    }
    if x_min < 0.0 && x_max > 0.0 {
        let col = map_x(0.0, x_min, x_max, width);
        for row in grid.iter_mut() {
            row[col] = '.';
        }
    }
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    for &(x, y) in curve {
        if !y.is_finite() || y < y_min || y > y_max {
            continue;
        }
        let cx = map_x(x, x_min, x_max, width);
        let cy = map_y(y, y_min, y_max, height);
        grid[cy][cx] = '-';
    }
}
