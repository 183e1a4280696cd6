//! Load two-column ascii data files.
//!
//! The accepted format is the traditional columnar one: one `x y` pair per
//! line, separated by whitespace or a comma. Blank lines and `#` comments are
//! skipped. Parse failures report the offending line number.

use std::fs;
use std::path::Path;

use crate::domain::PointSeries;
use crate::error::AppError;

/// Load a two-column x,y file into a series.
pub fn load_xy_file(path: &Path) -> Result<PointSeries, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to read data file '{}': {e}", path.display())))?;
    let series = parse_xy_text(&text)
        .map_err(|msg| AppError::new(2, format!("{}: {msg}", path.display())))?;
    if series.is_empty() {
        return Err(AppError::new(2, format!("{}: no data points found.", path.display())));
    }
    Ok(series)
}

/// Parse two-column x,y text. Returns a message naming the bad line on error.
pub fn parse_xy_text(text: &str) -> Result<PointSeries, String> {
    let mut series = PointSeries::new();
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split(|c: char| c == ',' || c.is_whitespace()).filter(|f| !f.is_empty());
        let (Some(xs), Some(ys)) = (fields.next(), fields.next()) else {
            return Err(format!("line {}: expected two columns, got '{line}'", lineno + 1));
        };
        if fields.next().is_some() {
            return Err(format!("line {}: expected two columns, got '{line}'", lineno + 1));
        }
        let x: f64 = xs
            .parse()
            .map_err(|_| format!("line {}: invalid x value '{xs}'", lineno + 1))?;
        let y: f64 = ys
            .parse()
            .map_err(|_| format!("line {}: invalid y value '{ys}'", lineno + 1))?;
        if !(x.is_finite() && y.is_finite()) {
            return Err(format!("line {}: non-finite value", lineno + 1));
        }
        series.add(x, y);
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whitespace_and_comma_columns() {
        let s = parse_xy_text("0 1.5\n1,2.5\n  2\t3.5  \n").unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.points()[1].x, 1.0);
        assert_eq!(s.points()[1].y, 2.5);
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let s = parse_xy_text("# depth speed\n\n0 1500\n1 1499\n").unwrap();
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn rejects_bad_rows_with_line_numbers() {
        let err = parse_xy_text("0 1\nnot-a-number 2\n").unwrap_err();
        assert!(err.contains("line 2"));

        let err = parse_xy_text("0 1\n1 2 3\n").unwrap_err();
        assert!(err.contains("line 2"));

        let err = parse_xy_text("0\n").unwrap_err();
        assert!(err.contains("line 1"));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(parse_xy_text("0 inf\n").is_err());
        assert!(parse_xy_text("NaN 0\n").is_err());
    }
}
