//! Domain types used throughout the pipeline.
//!
//! This module defines the observation series the regressions operate on:
//!
//! - `Point`: a single (x, y) observation
//! - `PointSeries`: an ordered multiset of points with cached sufficient
//!   statistics (sums, extrema)

pub mod series;

pub use series::*;
