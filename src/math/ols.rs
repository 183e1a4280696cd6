//! Closed-form ordinary least squares for a single line.
//!
//! The breakpoint searches solve the same tiny regression problem thousands of
//! times (every trial partition re-fits each segment), so the solver here is
//! the exact closed form driven by the series' cached sufficient statistics:
//!
//! ```text
//! slope     = Sxy / Sxx
//! intercept = (Σy - slope·Σx) / N
//! ```
//!
//! No iterative solver, no matrix decomposition: numerically exact given IEEE
//! double arithmetic, and O(1) once the aggregates exist.

use crate::domain::PointSeries;

/// Slope and intercept of a least-squares line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsLine {
    pub slope: f64,
    pub intercept: f64,
}

/// Closed-form OLS line through a series.
///
/// Returns `None` for an empty series. A series whose x values are all equal
/// (Sxx = 0, incl. the single-point case) gets slope 0 through the mean of y;
/// the equality check keeps the degenerate case away from a 0/0 division.
pub fn line_through(series: &PointSeries) -> Option<OlsLine> {
    let n = series.len();
    if n == 0 {
        return None;
    }

    let sxx = series.sxx();
    if n == 1 || sxx == 0.0 {
        return Some(OlsLine {
            slope: 0.0,
            intercept: series.sum_y() / n as f64,
        });
    }

    let slope = series.sxy() / sxx;
    let intercept = (series.sum_y() - slope * series.sum_x()) / n as f64;
    Some(OlsLine { slope, intercept })
}

/// Residual sum of squares of a series about a given line.
pub fn ssres_about(series: &PointSeries, slope: f64, intercept: f64) -> f64 {
    series
        .iter()
        .map(|p| {
            let r = p.y - slope * p.x - intercept;
            r * r
        })
        .sum()
}
