//! Formatted terminal output.
//!
//! Formatting stays in one place so the math code stays clean and output
//! stays deterministic (helpful for golden tests). Residual sums of squares
//! and sigmas are printed with exact `{}` float formatting; only coordinates
//! in the compact endpoint lists are rounded.

use crate::app::pipeline::RunOutput;
use crate::domain::Point;

/// Format the full run summary: dataset stats plus one block per fit.
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== mpr - multi-phase linear regression ===\n");
    out.push_str(&format!("NumPts = {}\n", run.series.len()));
    out.push_str(&format!(
        "Data range: x=[{}, {}] y=[{}, {}]\n\n",
        run.series.min_x(),
        run.series.max_x(),
        run.series.min_y(),
        run.series.max_y(),
    ));

    out.push_str("Single line:\n");
    out.push_str(&format!("   Sum-of-squares-of-residuals = {}\n", run.line.ssres));
    out.push_str(&format!("   Residual sigma = {}\n", run.line.sigma()));
    out.push_str("   Properties:\n");
    out.push_str(&format!("      Slope = {}\n", run.line.slope));
    out.push_str(&format!("      Yint  = {}\n", run.line.intercept));
    out.push_str(&endpoints_block(&run.line.polyline()));
    out.push('\n');

    if let Some(two) = &run.two {
        out.push_str("Two segments:\n");
        out.push_str(&format!("   Sum of the two sums-of-squares-of-residuals = {}\n", two.ssres));
        out.push_str(&format!("   Mean residual sigma = {}\n", two.avg_sigma));
        if two.is_poor_fit() {
            out.push_str("   WARNING: no admissible split found - bad line fit.\n");
        }
        out.push_str("   Properties:\n");
        out.push_str(&format!("      Slope1 = {}\n", two.slope1));
        out.push_str(&format!("       Yint1 = {}\n", two.intercept1));
        out.push_str(&format!("      Slope2 = {}\n", two.slope2));
        out.push_str(&format!("       Yint2 = {}\n", two.intercept2));
        out.push_str(&format!("      Breakpoint = {}\n", two.breakpoint));
        out.push_str(&endpoints_block(&two.polyline()));
        out.push('\n');
    }

    if let Some(three) = &run.three {
        out.push_str("Three segments:\n");
        out.push_str(&format!(
            "   Sum of the three sums-of-squares-of-residuals = {}\n",
            three.ssres
        ));
        out.push_str(&format!("   Mean residual sigma = {}\n", three.avg_sigma));
        out.push_str("   Properties:\n");
        out.push_str(&format!("      Slope1 = {}\n", three.slope1));
        out.push_str(&format!("       Yint1 = {}\n", three.intercept1));
        out.push_str(&format!("      Slope2 = {}\n", three.slope2));
        out.push_str(&format!("       Yint2 = {}\n", three.intercept2));
        out.push_str(&format!("      Slope3 = {}\n", three.slope3));
        out.push_str(&format!("       Yint3 = {}\n", three.intercept3));
        out.push_str(&format!(
            "      Breakpoints = {} / {}\n",
            three.breakpoint1, three.breakpoint2
        ));
        out.push_str(&endpoints_block(&three.polyline()));
        out.push('\n');
    }

    for (name, reason) in &run.skipped {
        out.push_str(&format!("(skipped {name} fit) {reason}\n"));
    }

    out
}

fn endpoints_block(points: &[Point]) -> String {
    let mut out = String::from("   Endpoints:\n");
    for p in points {
        out.push_str(&format!("      {:.6}, {:.6}\n", p.x, p.y));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_fits;
    use crate::domain::PointSeries;

    #[test]
    fn summary_lists_all_three_fits() {
        let series = PointSeries::from_points((0..10).map(|i| {
            let x = i as f64;
            (x, if x <= 4.0 { x } else { 4.0 })
        }));
        let run = run_fits(series).unwrap();
        let text = format_run_summary(&run);

        assert!(text.contains("NumPts = 10"));
        assert!(text.contains("Single line:"));
        assert!(text.contains("Two segments:"));
        assert!(text.contains("Three segments:"));
        assert!(text.contains("Breakpoint ="));
        assert!(!text.contains("WARNING"));
    }

    #[test]
    fn summary_notes_skipped_fits() {
        let series = PointSeries::from_points([(0.0, 0.0), (1.0, 1.0), (2.0, 2.5), (3.0, 2.0)]);
        let run = run_fits(series).unwrap();
        let text = format_run_summary(&run);
        assert!(text.contains("skipped three-segment fit"));
        assert!(!text.contains("Three segments:"));
    }

    #[test]
    fn summary_warns_on_poor_two_segment_fit() {
        // Two flat shelves: no admissible two-segment split exists.
        let series = PointSeries::from_points([
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 0.0),
            (3.0, 1.0),
            (4.0, 1.0),
            (5.0, 1.0),
        ]);
        let run = run_fits(series).unwrap();
        let text = format_run_summary(&run);
        assert!(text.contains("bad line fit"));
    }

    #[test]
    fn formatting_is_deterministic() {
        let series = || PointSeries::from_points((0..8).map(|i| (i as f64, (i * i) as f64)));
        let a = format_run_summary(&run_fits(series()).unwrap());
        let b = format_run_summary(&run_fits(series()).unwrap());
        assert_eq!(a, b);
    }
}
