//! `mpregress` library crate: multi-phase linear regression.
//!
//! Fits one, two, or three cojoined straight-line segments to a series of
//! (x, y) observations, choosing breakpoints that minimize the total residual
//! sum of squares. The three-segment search follows Williams (1970),
//! "Discrimination between regression models to determine the pattern of
//! enzyme synthesis in synchronous cell cultures", *Biometrics* 26.
//!
//! The binary (`mpr`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future GUI, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
