//! Numerical building blocks for the regression searches.

pub mod ols;

pub use ols::*;
