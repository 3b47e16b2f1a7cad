//! Synthetic point generation around a target polynomial.
//!
//! Used to seed the lab with something worth fitting: `count` points with
//! uniformly drawn `x` and Gaussian noise on `y` around the target curve.
//! Generation is fully deterministic for a given config (seeded RNG, no
//! hidden randomness), which keeps CLI runs and tests reproducible.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Point, SampleConfig};
use crate::engine::model::PolynomialModel;
use crate::error::AppError;

/// Generate `config.count` noisy points from the target polynomial.
pub fn generate_sample(
    target: &PolynomialModel,
    config: &SampleConfig,
) -> Result<Vec<Point>, AppError> {
    if config.count == 0 {
        return Err(AppError::new(2, "Sample count must be > 0."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::new(2, "Invalid x range for sample generation."));
    }
    if !(config.noise_sigma.is_finite() && config.noise_sigma >= 0.0) {
        return Err(AppError::new(2, "Noise sigma must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut points = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let x = rng.gen_range(config.x_min..=config.x_max);
        let noise: f64 = normal.sample(&mut rng);
        let y = target.evaluate(x) + config.noise_sigma * noise;
        points.push(Point::new(x, y));
    }

    Ok(points)
}
