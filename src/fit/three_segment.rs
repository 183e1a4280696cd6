//! Three-phase (two breakpoint) regression search.
//!
//! The search walks every ordered pair of interior data points (x[j], x[k]),
//! fits a free line to each of the three resulting segments, and keeps the
//! candidate with the lowest total residual sum of squares whose segment
//! intersections are geometrically admissible (strictly in range and inside
//! the per-breakpoint bracketing rectangles).
//!
//! Candidates that fail admissibility are not discarded outright: the
//! Williams (1970, *Biometrics* 26) correction estimates analytically the
//! residual increase from constraining the three free lines to meet exactly
//! at (x[j], x[k]), a closed-form quadratic form in place of a brute-force
//! constrained refit. A corrected candidate that still beats the running
//! minimum is accepted with the bracketing data values as its reported
//! breakpoints (the directly-admissible path reports the geometric
//! intersections instead; the asymmetry is deliberate and preserved).
//!
//! O(N³) overall: O(N²) candidate pairs, O(N) per three-way refit.

use serde::Serialize;

use crate::domain::{Point, PointSeries};
use crate::error::FitError;
use crate::fit::line::SegmentLine;
use crate::fit::{bracket_around, intersection_x, mean_sigma};

/// Best three-segment fit found by exhaustive breakpoint-pair search.
///
/// Immutable once constructed. Segments are ordered by increasing x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThreeSegmentFit {
    /// Total residual sum of squares over the three free segment fits.
    pub ssres: f64,
    /// Mean residual standard deviation across segments.
    pub avg_sigma: f64,
    pub slope1: f64,
    pub intercept1: f64,
    pub slope2: f64,
    pub intercept2: f64,
    pub slope3: f64,
    pub intercept3: f64,
    /// First (lesser) breakpoint, strictly inside the data range.
    pub breakpoint1: f64,
    /// Second (greater) breakpoint, strictly inside the data range.
    pub breakpoint2: f64,
    pub x_min: f64,
    pub x_max: f64,
}

/// Pure per-trial evaluation record for one candidate breakpoint pair.
#[derive(Debug, Clone, Copy)]
struct TripleTrial {
    s1: SegmentLine,
    s2: SegmentLine,
    s3: SegmentLine,
    ssres: f64,
    avg_sigma: f64,
    /// Intersections of adjacent segment lines. Coincident adjacent segments
    /// fall back to the series min x (first) / max x (second); parallel
    /// distinct segments have no intersection.
    cross1: Option<f64>,
    cross2: Option<f64>,
}

fn evaluate_split3(series: &PointSeries, x1: f64, x2: f64) -> TripleTrial {
    let (first, middle, last) = series.split3(x1, x2);
    let s1 = SegmentLine::fit_segment(&first);
    let s2 = SegmentLine::fit_segment(&middle);
    let s3 = SegmentLine::fit_segment(&last);
    TripleTrial {
        s1,
        s2,
        s3,
        ssres: s1.ssres + s2.ssres + s3.ssres,
        avg_sigma: mean_sigma(&[s1, s2, s3]),
        cross1: intersection_x(&s1, &s2, series.min_x()),
        cross2: intersection_x(&s2, &s3, series.max_x()),
    }
}

/// Williams' analytic estimate of the residual increase ΔR from constraining
/// the three free-fit lines to meet exactly at (x1, x2):
///
/// ```text
/// ΔR = m' A⁻¹ m = (m1²·a22 - 2·m1·m2·a12 + m2²·a11) / (a11·a22 - a12²)
/// ```
///
/// with m measuring how far each free intersection sits from its constraint
/// and A built from segment counts and x-dispersions. `None` when the trial
/// degenerates (zero-dispersion segment, singular A).
fn williams_correction(trial: &TripleTrial, x1: f64, x2: f64) -> Option<f64> {
    let (s1, s2, s3) = (&trial.s1, &trial.s2, &trial.s3);

    // Coincident adjacent segments contribute nothing: the slope difference
    // is exactly zero, so the intersection offset is irrelevant.
    let m1 = if s1.slope == s2.slope {
        0.0
    } else {
        (s1.slope - s2.slope) * (x1 - trial.cross1?)
    };
    let m2 = if s2.slope == s3.slope {
        0.0
    } else {
        (s2.slope - s3.slope) * (x2 - trial.cross2?)
    };

    let (n1, n2, n3) = (s1.n as f64, s2.n as f64, s3.n as f64);
    let a11 = 1.0 / n1
        + 1.0 / n2
        + (s1.x_mean - x1) * (s1.x_mean - x1) / s1.sxx
        + (s2.x_mean - x1) * (s2.x_mean - x1) / s2.sxx;
    let a12 = -1.0 / n2 - (s2.x_mean - x1) * (s2.x_mean - x2) / s2.sxx;
    let a22 = 1.0 / n2
        + 1.0 / n3
        + (s2.x_mean - x2) * (s2.x_mean - x2) / s2.sxx
        + (s3.x_mean - x2) * (s3.x_mean - x2) / s3.sxx;

    let det = a11 * a22 - a12 * a12;
    let dr = (m1 * m1 * a22 - 2.0 * m1 * m2 * a12 + m2 * m2 * a11) / det;
    dr.is_finite().then_some(dr)
}

impl ThreeSegmentFit {
    /// Search all valid ordered breakpoint pairs of a series sorted ascending
    /// by x.
    pub fn fit(series: &PointSeries) -> Result<Self, FitError> {
        let n = series.len();
        if n < 7 {
            return Err(FitError::InsufficientData { needed: 7, got: n });
        }
        debug_assert!(series.is_sorted_by_x());

        let min_x = series.min_x();
        let max_x = series.max_x();
        let span = max_x - min_x;

        // Seed at the first and second x tertiles. The running minimum starts
        // at the *constrained* (Williams-corrected) residual of the seed, so
        // free trials must genuinely improve on it; the reportable defaults
        // come from the seed's direct three-way fit.
        let seed_x1 = span / 3.0 + min_x;
        let seed_x2 = 2.0 * span / 3.0 + min_x;
        let seed = evaluate_split3(series, seed_x1, seed_x2);
        let mut best_ssres = match williams_correction(&seed, seed_x1, seed_x2) {
            Some(dr) => seed.ssres + dr,
            None => seed.ssres,
        };

        let in_range = |x: f64| x > min_x && x < max_x;
        let seed_bp1 = seed.cross1.filter(|&c| in_range(c)).unwrap_or(seed_x1);
        let seed_bp2 = seed.cross2.filter(|&c| in_range(c)).unwrap_or(seed_x2);
        let mut out = Self::from_trial(&seed, seed_bp1, seed_bp2, min_x, max_x);

        for j in 1..(n - 4) {
            for k in (j + 2)..(n - 2) {
                let x1 = series.points()[j].x;
                let x2 = series.points()[k].x;
                let trial = evaluate_split3(series, x1, x2);
                if !(trial.ssres < best_ssres) {
                    continue;
                }
                let (Some(c1), Some(c2)) = (trial.cross1, trial.cross2) else {
                    continue;
                };
                if !(in_range(c1) && in_range(c2)) {
                    continue;
                }
                let (Some(b1), Some(b2)) =
                    (bracket_around(series, x1), bracket_around(series, x2))
                else {
                    continue;
                };

                let directly_admissible =
                    c1 >= b1.0 && c1 <= b1.1 && c2 >= b2.0 && c2 <= b2.1;
                if directly_admissible {
                    best_ssres = trial.ssres;
                    out = Self::from_trial(&trial, c1, c2, min_x, max_x);
                } else if let Some(dr) = williams_correction(&trial, x1, x2) {
                    let corrected = trial.ssres + dr;
                    if corrected < best_ssres {
                        best_ssres = corrected;
                        // Corrected accept: the reported breakpoints are the
                        // bracketing data values, not the free intersections.
                        out = Self::from_trial(&trial, x1, x2, min_x, max_x);
                    }
                }
            }
        }

        Ok(out)
    }

    fn from_trial(trial: &TripleTrial, bp1: f64, bp2: f64, x_min: f64, x_max: f64) -> Self {
        Self {
            ssres: trial.ssres,
            avg_sigma: trial.avg_sigma,
            slope1: trial.s1.slope,
            intercept1: trial.s1.intercept,
            slope2: trial.s2.slope,
            intercept2: trial.s2.intercept,
            slope3: trial.s3.slope,
            intercept3: trial.s3.intercept,
            breakpoint1: bp1,
            breakpoint2: bp2,
            x_min,
            x_max,
        }
    }

    pub fn predict(&self, x: f64) -> f64 {
        if x <= self.breakpoint1 {
            self.slope1 * x + self.intercept1
        } else if x <= self.breakpoint2 {
            self.slope2 * x + self.intercept2
        } else {
            self.slope3 * x + self.intercept3
        }
    }

    /// Endpoints of the fitted polyline: data min, both breakpoints, data max.
    pub fn polyline(&self) -> Vec<Point> {
        vec![
            Point { x: self.x_min, y: self.slope1 * self.x_min + self.intercept1 },
            Point { x: self.breakpoint1, y: self.slope1 * self.breakpoint1 + self.intercept1 },
            Point { x: self.breakpoint2, y: self.slope2 * self.breakpoint2 + self.intercept2 },
            Point { x: self.x_max, y: self.slope3 * self.x_max + self.intercept3 },
        ]
    }
}
