//! Built-in example data generation.

pub mod sample;

pub use sample::*;
