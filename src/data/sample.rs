//! Synthetic example profile generation.
//!
//! The canonical demo dataset is an oceanic soundspeed profile with x = depth
//! (m) and y = speed (m/s): a well-mixed surface layer, a thermocline where
//! speed drops quickly, and a deep layer where pressure pushes speed back up.
//! Three roughly linear regimes with noise, exactly the structure the
//! multi-phase regressions are meant to discover.
//!
//! Generation is deterministic for a given seed (seeded `StdRng`, no global
//! RNG), so demo runs and tests are reproducible.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::PointSeries;
use crate::error::AppError;

/// Depth (m) where the mixed layer ends and the thermocline begins.
const MIXED_LAYER_BOTTOM: f64 = 100.0;
/// Depth (m) where the thermocline gives way to the deep pressure regime.
const THERMOCLINE_BOTTOM: f64 = 900.0;

/// Soundspeed (m/s) at the surface.
const SURFACE_SPEED: f64 = 1520.0;
/// Soundspeed gradient (m/s per m) within the mixed layer.
const MIXED_LAYER_GRADIENT: f64 = -0.005;
/// Soundspeed gradient within the thermocline.
const THERMOCLINE_GRADIENT: f64 = -0.045;
/// Soundspeed gradient in the deep layer (pressure effect).
const DEEP_GRADIENT: f64 = 0.016;

/// Options controlling example profile generation.
#[derive(Debug, Clone, Copy)]
pub struct SampleOptions {
    /// Number of (depth, speed) points to generate.
    pub count: usize,
    /// RNG seed.
    pub seed: u64,
    /// Standard deviation of the Gaussian measurement noise (m/s).
    pub noise_sigma: f64,
    /// Maximum depth (m).
    pub max_depth: f64,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            count: 60,
            seed: 42,
            noise_sigma: 0.8,
            max_depth: 2000.0,
        }
    }
}

/// Noise-free profile value at a given depth.
fn profile(depth: f64) -> f64 {
    if depth <= MIXED_LAYER_BOTTOM {
        SURFACE_SPEED + MIXED_LAYER_GRADIENT * depth
    } else if depth <= THERMOCLINE_BOTTOM {
        let top = SURFACE_SPEED + MIXED_LAYER_GRADIENT * MIXED_LAYER_BOTTOM;
        top + THERMOCLINE_GRADIENT * (depth - MIXED_LAYER_BOTTOM)
    } else {
        let top = SURFACE_SPEED
            + MIXED_LAYER_GRADIENT * MIXED_LAYER_BOTTOM
            + THERMOCLINE_GRADIENT * (THERMOCLINE_BOTTOM - MIXED_LAYER_BOTTOM);
        top + DEEP_GRADIENT * (depth - THERMOCLINE_BOTTOM)
    }
}

/// Generate a synthetic soundspeed-style profile.
///
/// Depths are evenly spaced from the surface to `max_depth`; speeds carry
/// Gaussian noise. The returned series is not yet sorted (evenly spaced
/// depths happen to be, but callers sort before fitting regardless).
pub fn generate_sample(opts: &SampleOptions) -> Result<PointSeries, AppError> {
    if opts.count < 2 {
        return Err(AppError::new(2, "Sample count must be at least 2."));
    }
    if !(opts.max_depth.is_finite() && opts.max_depth > 0.0) {
        return Err(AppError::new(2, "Sample max depth must be finite and > 0."));
    }
    if !(opts.noise_sigma.is_finite() && opts.noise_sigma >= 0.0) {
        return Err(AppError::new(2, "Sample noise sigma must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(opts.seed);
    let noise = Normal::new(0.0, opts.noise_sigma.max(f64::MIN_POSITIVE))
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut series = PointSeries::new();
    let step = opts.max_depth / (opts.count - 1) as f64;
    for i in 0..opts.count {
        let depth = step * i as f64;
        let eps = if opts.noise_sigma > 0.0 { noise.sample(&mut rng) } else { 0.0 };
        series.add(depth, profile(depth) + eps);
    }

    Ok(series)
}
