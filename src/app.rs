//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads or generates the point series
//! - runs the one-, two- and three-phase regressions
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, DemoArgs, FitArgs, OutputArgs};
use crate::data::{SampleOptions, generate_sample};
use crate::domain::PointSeries;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `mpr` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Demo(args) => handle_demo(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let series = crate::io::ingest::load_xy_file(&args.file)?;
    println!("Data file {}: Calculating...", args.file.display());
    fit_and_report(series, &args.output)
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let opts = SampleOptions {
        count: args.count,
        seed: args.seed,
        noise_sigma: args.noise,
        ..SampleOptions::default()
    };
    let series = generate_sample(&opts)?;
    println!(
        "Using built-in example data, a synthetic oceanic soundspeed profile\n\
         with x=depth(m) and y=speed(m/s): Calculating..."
    );
    fit_and_report(series, &args.output)
}

fn fit_and_report(series: PointSeries, output: &OutputArgs) -> Result<(), AppError> {
    let run = pipeline::run_fits(series)?;

    println!("{}", crate::report::format_run_summary(&run));

    if output.plot_enabled() {
        let plot = crate::plot::render_ascii_plot(&run, output.width, output.height);
        println!("{plot}");
    }

    if let Some(path) = &output.export {
        crate::io::export::write_results_csv(path, &run)?;
    }
    if let Some(path) = &output.export_report {
        crate::io::export::write_report_json(path, &run)?;
    }

    Ok(())
}
