//! Export fit results to CSV and JSON.
//!
//! The CSV is per-point (observed, fitted, residual for each model) for
//! spreadsheets and downstream scripts; the JSON is the portable
//! representation of the whole run (stats, parameters, polylines).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::app::pipeline::RunOutput;
use crate::domain::Point;
use crate::error::AppError;
use crate::fit::{LineFit, ThreeSegmentFit, TwoSegmentFit};

/// Write per-point observed/fitted/residual columns to a CSV file.
///
/// Columns for skipped models are left empty.
pub fn write_results_csv(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "x,y,fit1,resid1,fit2,resid2,fit3,resid3")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for p in run.series.iter() {
        let (fit1, resid1) = fitted_pair(p, run.line.predict(p.x));
        let (fit2, resid2) = run
            .two
            .map(|two| fitted_pair(p, two.predict(p.x)))
            .unwrap_or_default();
        let (fit3, resid3) = run
            .three
            .map(|three| fitted_pair(p, three.predict(p.x)))
            .unwrap_or_default();

        writeln!(
            file,
            "{},{},{fit1},{resid1},{fit2},{resid2},{fit3},{resid3}",
            p.x, p.y
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

fn fitted_pair(p: &Point, y_fit: f64) -> (String, String) {
    (format!("{y_fit}"), format!("{}", p.y - y_fit))
}

/// The JSON report schema.
#[derive(Debug, Serialize)]
struct ReportFile<'a> {
    tool: &'static str,
    n_points: usize,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    single: FitSection<&'a LineFit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    two_segment: Option<FitSection<&'a TwoSegmentFit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    three_segment: Option<FitSection<&'a ThreeSegmentFit>>,
}

#[derive(Debug, Serialize)]
struct FitSection<T: Serialize> {
    #[serde(flatten)]
    fit: T,
    polyline: Vec<Point>,
}

/// Write the whole run (stats + all fits + polylines) as pretty JSON.
pub fn write_report_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;

    let report = ReportFile {
        tool: "mpr",
        n_points: run.series.len(),
        x_min: run.series.min_x(),
        x_max: run.series.max_x(),
        y_min: run.series.min_y(),
        y_max: run.series.max_y(),
        single: FitSection { fit: &run.line, polyline: run.line.polyline() },
        two_segment: run.two.as_ref().map(|two| FitSection {
            fit: two,
            polyline: two.polyline(),
        }),
        three_segment: run.three.as_ref().map(|three| FitSection {
            fit: three,
            polyline: three.polyline(),
        }),
    };

    serde_json::to_writer_pretty(file, &report)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_fits;
    use crate::domain::PointSeries;

    fn bent_series() -> PointSeries {
        PointSeries::from_points((0..10).map(|i| {
            let x = i as f64;
            (x, if x <= 4.0 { x } else { 4.0 })
        }))
    }

    #[test]
    fn csv_export_has_header_and_one_row_per_point() {
        let run = run_fits(bent_series()).unwrap();
        let dir = std::env::temp_dir();
        let path = dir.join("mpr_export_test.csv");
        write_results_csv(&path, &run).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + run.series.len());
        assert!(lines[0].starts_with("x,y,fit1"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn json_report_round_trips_as_valid_json() {
        let run = run_fits(bent_series()).unwrap();
        let dir = std::env::temp_dir();
        let path = dir.join("mpr_report_test.json");
        write_report_json(&path, &run).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["tool"], "mpr");
        assert_eq!(value["n_points"], 10);
        assert!(value["two_segment"]["polyline"].as_array().unwrap().len() == 3);
        assert!(value["three_segment"]["polyline"].as_array().unwrap().len() == 4);
        std::fs::remove_file(&path).ok();
    }
}
