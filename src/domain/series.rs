//! Observation series with cached sufficient statistics.
//!
//! Every regression in this crate is driven by the same handful of aggregate
//! quantities (N, Σx, Σy, Σxy, Σx², extrema). `PointSeries` maintains them
//! incrementally on every `add`, so the O(N²)/O(N³) breakpoint searches can
//! query `mean_x`/`sxx`/`sxy` in O(1) per sub-series.
//!
//! Sub-series produced while partitioning are independent copies, not views:
//! each carries its own aggregates, so trial evaluations never alias the
//! parent series.

use serde::{Deserialize, Serialize};

/// A single (x, y) observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Ordered multiset of (x, y) observations plus cached aggregates.
///
/// All regression searches require the series to be sorted ascending by x
/// (`sort_by_x`); running them on an unsorted series gives undefined results.
#[derive(Debug, Clone)]
pub struct PointSeries {
    points: Vec<Point>,
    sum_x: f64,
    sum_y: f64,
    sum_xy: f64,
    sum_xx: f64,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl PointSeries {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            sum_x: 0.0,
            sum_y: 0.0,
            sum_xy: 0.0,
            sum_xx: 0.0,
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut series = Self::new();
        for (x, y) in points {
            series.add(x, y);
        }
        series
    }

    /// Append a point, updating the cached aggregates in O(1).
    pub fn add(&mut self, x: f64, y: f64) {
        self.points.push(Point { x, y });
        self.sum_x += x;
        self.sum_y += y;
        self.sum_xy += x * y;
        self.sum_xx += x * x;
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    /// Reorder points ascending by x. Required before any regression search.
    pub fn sort_by_x(&mut self) {
        self.points.sort_by(|a, b| a.x.total_cmp(&b.x));
    }

    pub fn is_sorted_by_x(&self) -> bool {
        self.points.windows(2).all(|w| w[0].x <= w[1].x)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Smallest x seen so far (+inf when empty).
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    /// Largest x seen so far (-inf when empty).
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn sum_x(&self) -> f64 {
        self.sum_x
    }

    pub fn sum_y(&self) -> f64 {
        self.sum_y
    }

    /// Mean of x. Meaningful only for non-empty series.
    pub fn mean_x(&self) -> f64 {
        self.sum_x / self.points.len() as f64
    }

    /// Sum of squared deviations of x from its mean (Sxx).
    ///
    /// Meaningful only for series of 2 or more points; callers that need a
    /// full line fit check the count first and fail with `InsufficientData`.
    pub fn sxx(&self) -> f64 {
        let n = self.points.len() as f64;
        self.sum_xx - self.sum_x * self.sum_x / n
    }

    /// Cross term Σ(x - x̄)(y - ȳ) (Sxy).
    pub fn sxy(&self) -> f64 {
        let n = self.points.len() as f64;
        self.sum_xy - self.sum_x * self.sum_y / n
    }

    /// Partition into (x ≤ split, x > split). Both halves are independent
    /// copies carrying their own aggregates.
    pub fn split_at(&self, split: f64) -> (PointSeries, PointSeries) {
        let mut left = PointSeries::new();
        let mut right = PointSeries::new();
        for p in &self.points {
            if p.x <= split {
                left.add(p.x, p.y);
            } else {
                right.add(p.x, p.y);
            }
        }
        (left, right)
    }

    /// Partition into (x ≤ x1, x1 < x ≤ x2, x > x2).
    pub fn split3(&self, x1: f64, x2: f64) -> (PointSeries, PointSeries, PointSeries) {
        let mut first = PointSeries::new();
        let mut middle = PointSeries::new();
        let mut last = PointSeries::new();
        for p in &self.points {
            if p.x <= x1 {
                first.add(p.x, p.y);
            } else if p.x <= x2 {
                middle.add(p.x, p.y);
            } else {
                last.add(p.x, p.y);
            }
        }
        (first, middle, last)
    }
}
