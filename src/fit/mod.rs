//! Multi-phase regression fits.
//!
//! Responsibilities:
//!
//! - fit one line to a whole series (`LineFit`)
//! - search all single breakpoints for the best two-segment fit
//!   (`TwoSegmentFit`)
//! - search all ordered breakpoint pairs for the best three-segment fit,
//!   using the Williams correction for inadmissible candidates
//!   (`ThreeSegmentFit`)
//!
//! Shared machinery (geometric intersections, bracketing-rectangle
//! admissibility, sigma averaging) lives here.

pub mod line;
pub mod three_segment;
pub mod two_segment;

pub use line::*;
pub use three_segment::*;
pub use two_segment::*;

use crate::domain::PointSeries;
use line::SegmentLine;

/// Intersection x of two fitted segment lines.
///
/// Coincident lines (same slope *and* intercept) intersect everywhere; the
/// caller supplies the x to report in that case. Parallel distinct lines do
/// not intersect, and the explicit slope check keeps the division fault out.
pub(crate) fn intersection_x(
    a: &SegmentLine,
    b: &SegmentLine,
    coincident_fallback: f64,
) -> Option<f64> {
    if a.slope == b.slope {
        if a.intercept == b.intercept {
            return Some(coincident_fallback);
        }
        return None;
    }
    Some((b.intercept - a.intercept) / (a.slope - b.slope))
}

/// The bracketing rectangle around a candidate breakpoint: the interval of
/// the two data x-values immediately straddling `x` (the last such pair, so
/// a candidate sitting exactly on a data point brackets to its right).
///
/// `None` when `x` falls outside the data span.
pub(crate) fn bracket_around(series: &PointSeries, x: f64) -> Option<(f64, f64)> {
    let mut found = None;
    for w in series.points().windows(2) {
        if w[0].x <= x && w[1].x >= x {
            found = Some((w[0].x, w[1].x));
        }
    }
    found
}

/// Mean residual standard deviation over the segments where it is defined
/// (2+ points). 0 when no segment qualifies.
pub(crate) fn mean_sigma(segments: &[SegmentLine]) -> f64 {
    let sigmas: Vec<f64> = segments.iter().filter_map(SegmentLine::sigma).collect();
    if sigmas.is_empty() {
        return 0.0;
    }
    sigmas.iter().sum::<f64>() / sigmas.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(slope: f64, intercept: f64) -> SegmentLine {
        SegmentLine {
            slope,
            intercept,
            ssres: 0.0,
            n: 2,
            x_mean: 0.0,
            sxx: 1.0,
        }
    }

    #[test]
    fn intersection_of_crossing_lines() {
        // y = x and y = -x + 4 cross at x = 2.
        let x = intersection_x(&seg(1.0, 0.0), &seg(-1.0, 4.0), 0.0);
        assert_eq!(x, Some(2.0));
    }

    #[test]
    fn coincident_lines_use_fallback() {
        assert_eq!(intersection_x(&seg(1.0, 0.0), &seg(1.0, 0.0), 9.0), Some(9.0));
    }

    #[test]
    fn parallel_distinct_lines_do_not_intersect() {
        assert_eq!(intersection_x(&seg(1.0, 0.0), &seg(1.0, 2.0), 9.0), None);
    }

    #[test]
    fn bracket_straddles_candidate() {
        let s = PointSeries::from_points((0..5).map(|i| (i as f64, 0.0)));
        assert_eq!(bracket_around(&s, 2.5), Some((2.0, 3.0)));
        // A candidate on a data point brackets to its right.
        assert_eq!(bracket_around(&s, 2.0), Some((2.0, 3.0)));
        assert_eq!(bracket_around(&s, -1.0), None);
        assert_eq!(bracket_around(&s, 4.5), None);
    }
}
