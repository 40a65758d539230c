//! heap-bench: command-line benchmark runner
//!
//! Runs the `(size, shape, scenario)` matrix on the instrumented max-heap
//! and appends the results to a CSV report.
//!
//! ```bash
//! heap-bench --sizes 100,1000 --output results.csv --seed 42
//! heap-bench sizes=100,1000 output=results.csv
//! RUST_LOG=debug heap-bench --scenario increaseKey --shape sorted
//! ```

use anyhow::Context;
use clap::Parser;
use instrumented_heap::bench::run_matrix;
use instrumented_heap::config::CliArgs;
use instrumented_heap::report::{CsvReport, MatrixRow};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliArgs::parse()
        .into_config()
        .context("invalid benchmark configuration")?;
    let seed = config.seed_or_random();

    info!(
        sizes = ?config.sizes,
        output = %config.output.display(),
        seed,
        "Starting benchmark run"
    );

    let mut report = CsvReport::<MatrixRow>::append_to(&config.output)
        .with_context(|| format!("failed to open report {}", config.output.display()))?;
    let summary = run_matrix(&config, seed, &mut report)
        .with_context(|| format!("benchmark run failed (seed {seed})"))?;

    info!(rows = summary.rows, seed = summary.seed, "Benchmark run complete");
    println!(
        "Benchmark finished! {} rows saved in {}",
        summary.rows,
        config.output.display()
    );

    Ok(())
}
