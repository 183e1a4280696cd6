//! Shared fit pipeline used by every front end.
//!
//! One place owns the workflow: sort the series, then run the one-, two-, and
//! three-phase regressions over it. Front ends (CLI printing, plotting,
//! exports) only consume the `RunOutput`.

use crate::domain::PointSeries;
use crate::error::AppError;
use crate::fit::{LineFit, ThreeSegmentFit, TwoSegmentFit};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// The sorted series the fits were computed from.
    pub series: PointSeries,
    pub line: LineFit,
    pub two: Option<TwoSegmentFit>,
    pub three: Option<ThreeSegmentFit>,
    /// Fits that could not run, with the reason (small datasets).
    pub skipped: Vec<(&'static str, String)>,
}

/// Sort the series and run all three regressions.
///
/// The single-line fit is required; the segmented searches are skipped with a
/// recorded reason when the series is too small for them, so a 4-point file
/// still produces useful output.
pub fn run_fits(mut series: PointSeries) -> Result<RunOutput, AppError> {
    series.sort_by_x();

    let line = LineFit::fit(&series).map_err(AppError::from)?;

    let mut skipped = Vec::new();
    let two = match TwoSegmentFit::fit(&series) {
        Ok(fit) => Some(fit),
        Err(e) => {
            skipped.push(("two-segment", e.to_string()));
            None
        }
    };
    let three = match ThreeSegmentFit::fit(&series) {
        Ok(fit) => Some(fit),
        Err(e) => {
            skipped.push(("three-segment", e.to_string()));
            None
        }
    };

    Ok(RunOutput {
        series,
        line,
        two,
        three,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_all_fits_on_large_series() {
        let series = PointSeries::from_points((0..12).map(|i| {
            let x = i as f64;
            (x, if x <= 4.0 { x } else { 4.0 })
        }));
        let run = run_fits(series).unwrap();
        assert!(run.two.is_some());
        assert!(run.three.is_some());
        assert!(run.skipped.is_empty());
    }

    #[test]
    fn small_series_skips_segmented_fits_with_reasons() {
        let series = PointSeries::from_points([(0.0, 0.0), (1.0, 1.0), (2.0, 2.5), (3.0, 2.0)]);
        let run = run_fits(series).unwrap();
        assert!(run.two.is_some());
        assert!(run.three.is_none());
        assert_eq!(run.skipped.len(), 1);
        assert_eq!(run.skipped[0].0, "three-segment");
        assert!(run.skipped[0].1.contains("insufficient data"));
    }

    #[test]
    fn unsorted_input_is_sorted_before_fitting() {
        let series = PointSeries::from_points([(3.0, 2.0), (0.0, 0.0), (2.0, 2.0), (1.0, 1.0)]);
        let run = run_fits(series).unwrap();
        assert!(run.series.is_sorted_by_x());
    }

    #[test]
    fn below_two_points_fails() {
        let series = PointSeries::from_points([(0.0, 0.0)]);
        assert!(run_fits(series).is_err());
    }
}
