//! File input/output for the command-line front end.
//!
//! The core regressions never touch the filesystem; these modules load raw
//! (x, y) observations into a `PointSeries` and write results back out.

pub mod export;
pub mod ingest;
