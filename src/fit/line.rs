//! Single-segment least-squares fit.
//!
//! `LineFit` is the public one-line regression result. `SegmentLine` is its
//! degenerate-tolerant crate-internal sibling used while the breakpoint
//! searches carve the series into trial segments: a segment of 0 or 1 points
//! contributes ssres 0 by convention (its slope/intercept are irrelevant to
//! the accumulated residual, and its sigma is undefined and never computed).

use serde::Serialize;

use crate::domain::{Point, PointSeries};
use crate::error::FitError;
use crate::math::{line_through, ssres_about};

/// Closed-form OLS fit of one line to a whole series.
///
/// Immutable once constructed; requires at least 2 points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    /// Residual sum of squares (SSres), ≥ 0.
    pub ssres: f64,
    pub n: usize,
    /// Data x-range captured at fit time, for rendering the fitted segment.
    pub x_min: f64,
    pub x_max: f64,
}

impl LineFit {
    pub fn fit(series: &PointSeries) -> Result<Self, FitError> {
        if series.len() < 2 {
            return Err(FitError::InsufficientData {
                needed: 2,
                got: series.len(),
            });
        }
        let Some(line) = line_through(series) else {
            return Err(FitError::InsufficientData {
                needed: 2,
                got: series.len(),
            });
        };
        Ok(Self {
            slope: line.slope,
            intercept: line.intercept,
            ssres: ssres_about(series, line.slope, line.intercept),
            n: series.len(),
            x_min: series.min_x(),
            x_max: series.max_x(),
        })
    }

    /// Residual standard deviation, sqrt(ssres / (n - 1)).
    pub fn sigma(&self) -> f64 {
        (self.ssres / (self.n - 1) as f64).sqrt()
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Endpoints of the fitted line over the data x-range.
    pub fn polyline(&self) -> Vec<Point> {
        vec![
            Point { x: self.x_min, y: self.predict(self.x_min) },
            Point { x: self.x_max, y: self.predict(self.x_max) },
        ]
    }
}

/// Per-segment fit used as intermediate search state.
///
/// Carries the segment statistics (count, x-mean, Sxx) needed by the Williams
/// correction so trial records stay value-typed and the trial sub-series can
/// be discarded immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SegmentLine {
    pub slope: f64,
    pub intercept: f64,
    pub ssres: f64,
    pub n: usize,
    pub x_mean: f64,
    pub sxx: f64,
}

impl SegmentLine {
    /// Fit a trial segment, tolerating 0- and 1-point segments (ssres 0).
    pub fn fit_segment(series: &PointSeries) -> Self {
        match line_through(series) {
            Some(line) if series.len() >= 2 => Self {
                slope: line.slope,
                intercept: line.intercept,
                ssres: ssres_about(series, line.slope, line.intercept),
                n: series.len(),
                x_mean: series.mean_x(),
                sxx: series.sxx(),
            },
            Some(line) => Self {
                slope: line.slope,
                intercept: line.intercept,
                ssres: 0.0,
                n: 1,
                x_mean: series.mean_x(),
                sxx: 0.0,
            },
            None => Self {
                slope: 0.0,
                intercept: 0.0,
                ssres: 0.0,
                n: 0,
                x_mean: 0.0,
                sxx: 0.0,
            },
        }
    }

    /// Residual standard deviation; undefined for segments of fewer than
    /// 2 points, which are excluded from the searches' sigma averages.
    pub fn sigma(&self) -> Option<f64> {
        if self.n < 2 {
            return None;
        }
        Some((self.ssres / (self.n - 1) as f64).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_exact_collinear_points() {
        let s = PointSeries::from_points((0..5).map(|i| (i as f64, i as f64)));
        let fit = LineFit::fit(&s).unwrap();
        assert!((fit.slope - 1.0).abs() < 1e-12);
        assert!(fit.intercept.abs() < 1e-12);
        assert!(fit.ssres < 1e-20);
        assert!(fit.sigma() < 1e-10);
    }

    #[test]
    fn ssres_nonnegative_and_sigma_finite() {
        let s = PointSeries::from_points([(0.0, 0.0), (1.0, 1.2), (2.0, 1.7), (3.0, 3.3)]);
        let fit = LineFit::fit(&s).unwrap();
        assert!(fit.ssres >= 0.0);
        assert!(fit.sigma().is_finite());
    }

    #[test]
    fn one_point_is_insufficient() {
        let s = PointSeries::from_points([(1.0, 1.0)]);
        assert_eq!(
            LineFit::fit(&s),
            Err(FitError::InsufficientData { needed: 2, got: 1 })
        );
    }

    #[test]
    fn polyline_spans_data_range() {
        let s = PointSeries::from_points([(0.0, 1.0), (2.0, 5.0)]);
        let fit = LineFit::fit(&s).unwrap();
        let ends = fit.polyline();
        assert_eq!(ends.len(), 2);
        assert_eq!(ends[0].x, 0.0);
        assert_eq!(ends[1].x, 2.0);
        assert!((ends[0].y - 1.0).abs() < 1e-12);
        assert!((ends[1].y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_segments_have_zero_ssres_and_no_sigma() {
        let empty = SegmentLine::fit_segment(&PointSeries::new());
        assert_eq!(empty.ssres, 0.0);
        assert_eq!(empty.n, 0);
        assert!(empty.sigma().is_none());

        let single = SegmentLine::fit_segment(&PointSeries::from_points([(3.0, 7.0)]));
        assert_eq!(single.ssres, 0.0);
        assert_eq!(single.n, 1);
        assert!(single.sigma().is_none());
    }
}
