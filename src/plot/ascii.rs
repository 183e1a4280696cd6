//! ASCII plotting for terminal output.
//!
//! Intentionally "dumb" (fixed-size character grid), optimized for quick
//! visual sanity checks and deterministic output.
//!
//! Plot elements:
//! - observed points: `o` (drawn last, so they overlay the lines)
//! - fitted polylines: `1` (single line), `2` (two segments), `3` (three)

use crate::app::pipeline::RunOutput;
use crate::domain::{Point, PointSeries};

/// Render the observed points and every available fitted polyline.
pub fn render_ascii_plot(run: &RunOutput, width: usize, height: usize) -> String {
    let mut polylines: Vec<(char, Vec<Point>)> = vec![('1', run.line.polyline())];
    if let Some(two) = &run.two {
        polylines.push(('2', two.polyline()));
    }
    if let Some(three) = &run.three {
        polylines.push(('3', three.polyline()));
    }
    render_plot(&run.series, &polylines, width, height)
}

fn render_plot(
    series: &PointSeries,
    polylines: &[(char, Vec<Point>)],
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (x_min, x_max) = pad_range(series.min_x(), series.max_x(), 0.0);
    let (y_min, y_max) = pad_range(series.min_y(), series.max_y(), 0.05);

    let mut grid = vec![vec![' '; width]; height];

    for (ch, poly) in polylines {
        draw_polyline(&mut grid, poly, x_min, x_max, y_min, y_max, *ch);
    }
    for p in series.iter() {
        let col = map_x(p.x, x_min, x_max, width);
        let row = map_y(p.y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]\n"
    ));
    for row in &grid {
        let line: String = row.iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn draw_polyline(
    grid: &mut [Vec<char>],
    poly: &[Point],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    ch: char,
) {
    let width = grid[0].len();
    let height = grid.len();
    for seg in poly.windows(2) {
        let (a, b) = (seg[0], seg[1]);
        if b.x <= a.x {
            continue;
        }
        // Sample the segment once per column it crosses.
        let col_a = map_x(a.x, x_min, x_max, width);
        let col_b = map_x(b.x, x_min, x_max, width);
        for col in col_a..=col_b {
            let u = if col_b == col_a {
                0.0
            } else {
                (col - col_a) as f64 / (col_b - col_a) as f64
            };
            let y = a.y + u * (b.y - a.y);
            let row = map_y(y, y_min, y_max, height);
            if grid[row][col] == ' ' {
                grid[row][col] = ch;
            }
        }
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    if !(min.is_finite() && max.is_finite()) || max < min {
        return (0.0, 1.0);
    }
    if max == min {
        return (min - 0.5, max + 0.5);
    }
    let pad = (max - min) * frac;
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    ((u * (width - 1) as f64).round() as usize).min(width - 1)
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // Row 0 is the top of the grid.
    let row = ((1.0 - u) * (height - 1) as f64).round() as usize;
    row.min(height - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_fits;

    #[test]
    fn plot_has_requested_height_and_marks_points() {
        let series = PointSeries::from_points((0..10).map(|i| {
            let x = i as f64;
            (x, if x <= 4.0 { x } else { 4.0 })
        }));
        let run = run_fits(series).unwrap();
        let plot = render_ascii_plot(&run, 60, 15);

        let lines: Vec<&str> = plot.lines().collect();
        assert_eq!(lines.len(), 1 + 15);
        assert!(lines[0].starts_with("Plot:"));
        assert!(plot.contains('o'));
    }

    #[test]
    fn plot_output_is_deterministic() {
        let series = || PointSeries::from_points((0..10).map(|i| (i as f64, (i % 4) as f64)));
        let a = render_ascii_plot(&run_fits(series()).unwrap(), 40, 10);
        let b = render_ascii_plot(&run_fits(series()).unwrap(), 40, 10);
        assert_eq!(a, b);
    }

    #[test]
    fn flat_series_does_not_collapse_the_y_range() {
        let series = PointSeries::from_points((0..8).map(|i| (i as f64, 5.0)));
        let run = run_fits(series).unwrap();
        let plot = render_ascii_plot(&run, 40, 10);
        assert!(plot.contains('o'));
    }
}
