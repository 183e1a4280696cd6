//! Command-line parsing.
//!
//! Argument parsing and command dispatch stay separate from the
//! modeling/math code; `app` owns dispatch, this module owns the flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "mpr", version, about = "Multi-phase linear regression (1-3 cojoined segments)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a two-column ascii file of x,y points and print the results.
    Fit(FitArgs),
    /// Fit built-in example data (a synthetic oceanic soundspeed profile).
    Demo(DemoArgs),
}

#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Two-column ascii data file (x y per line; '#' comments allowed).
    pub file: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Number of points to generate.
    #[arg(short = 'n', long, default_value_t = 60)]
    pub count: usize,

    /// Random seed for example data generation.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Measurement noise standard deviation.
    #[arg(long, default_value_t = 0.8)]
    pub noise: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Output options shared by both subcommands.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export per-point results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full report (stats + fits + polylines) to JSON.
    #[arg(long = "export-report")]
    pub export_report: Option<PathBuf>,
}

impl OutputArgs {
    pub fn plot_enabled(&self) -> bool {
        self.plot && !self.no_plot
    }
}
