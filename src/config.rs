//! Benchmark configuration
//!
//! Values are resolved in this order, highest priority first:
//!
//! 1. legacy positional `key=value` arguments (`sizes=100,1000`, `output=out.csv`, `seed=7`)
//! 2. command-line flags
//! 3. environment variables (`HEAP_BENCH_SIZES`, `HEAP_BENCH_OUTPUT`, `HEAP_BENCH_SEED`)
//! 4. defaults from [`BenchConfig::default`]

use crate::bench::{Scenario, ScenarioOptions};
use crate::error::ConfigError;
use crate::workload::InputShape;
use clap::Parser;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use tracing::debug;

/// Default input sizes
pub const DEFAULT_SIZES: [usize; 4] = [100, 1_000, 10_000, 100_000];

/// Default report path
pub const DEFAULT_OUTPUT: &str = "benchmark_results.csv";

/// Fully resolved benchmark settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Input sizes to run, in order
    pub sizes: Vec<usize>,
    /// CSV report path
    pub output: PathBuf,
    /// RNG seed; drawn from OS entropy when `None`
    pub seed: Option<u64>,
    pub shapes: Vec<InputShape>,
    pub scenarios: Vec<Scenario>,
    /// `increaseKey` performs `max(1, n / increase_key_divisor)` updates
    pub increase_key_divisor: usize,
    /// Range each `increaseKey` bump is drawn from
    pub bump: RangeInclusive<i32>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        let options = ScenarioOptions::matrix();
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            seed: None,
            shapes: InputShape::ALL.to_vec(),
            scenarios: Scenario::ALL.to_vec(),
            increase_key_divisor: options.increase_key_divisor,
            bump: options.bump,
        }
    }
}

impl BenchConfig {
    /// Options passed to each scenario run
    pub fn scenario_options(&self) -> ScenarioOptions {
        ScenarioOptions {
            increase_key_divisor: self.increase_key_divisor,
            bump: self.bump.clone(),
        }
    }

    /// The configured seed, or a fresh random one
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Applies one legacy `key=value` argument
    ///
    /// # Errors
    /// [`ConfigError::UnknownArgument`] for anything other than `sizes`,
    /// `output` or `seed`, and the parse error of the value otherwise.
    pub fn apply_legacy_arg(&mut self, arg: &str) -> Result<(), ConfigError> {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| ConfigError::UnknownArgument(arg.to_string()))?;

        match key {
            "sizes" => self.sizes = parse_sizes(value)?,
            "output" => self.output = PathBuf::from(value),
            "seed" => {
                let seed = value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::UnknownArgument(arg.to_string()))?;
                self.seed = Some(seed);
            }
            _ => return Err(ConfigError::UnknownArgument(arg.to_string())),
        }
        debug!(key, value, "Applied legacy argument");
        Ok(())
    }

    /// Checks that the configuration describes a runnable benchmark
    ///
    /// # Errors
    /// [`ConfigError::ValidationFailed`] naming the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sizes.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "at least one size is required".to_string(),
            ));
        }
        if self.sizes.contains(&0) {
            return Err(ConfigError::ValidationFailed(
                "sizes must be positive".to_string(),
            ));
        }
        if self.shapes.is_empty() || self.scenarios.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "at least one shape and one scenario are required".to_string(),
            ));
        }
        if self.increase_key_divisor == 0 {
            return Err(ConfigError::ValidationFailed(
                "increase-key divisor must be positive".to_string(),
            ));
        }
        if *self.bump.start() < 0 || self.bump.is_empty() {
            return Err(ConfigError::ValidationFailed(format!(
                "bump range {:?} must be non-empty and non-negative",
                self.bump
            )));
        }
        Ok(())
    }
}

/// Parses a comma-separated list of positive sizes
///
/// # Errors
/// [`ConfigError::InvalidSizes`] if any entry is empty, negative, zero or
/// not a number.
pub fn parse_sizes(list: &str) -> Result<Vec<usize>, ConfigError> {
    list.split(',')
        .map(|part| match part.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidSizes(list.to_string())),
        })
        .collect()
}

/// Command-line interface of the `heap-bench` binary
#[derive(Parser, Debug, Clone)]
#[command(name = "heap-bench")]
#[command(version)]
#[command(about = "Benchmark an instrumented max-heap and record operation counts to CSV")]
#[command(long_about = "
Runs every combination of input size, input shape and scenario on a fresh
instrumented max-heap, and appends one CSV row per combination with the
elapsed time and the comparison, swap, allocation, array-access and depth
counters.

Legacy `key=value` arguments (sizes=..., output=..., seed=...) are accepted
and override the corresponding flags.
")]
pub struct CliArgs {
    /// Comma-separated input sizes
    #[arg(long, env = "HEAP_BENCH_SIZES", value_delimiter = ',')]
    pub sizes: Vec<usize>,

    /// CSV report path (rows are appended)
    #[arg(long, short, env = "HEAP_BENCH_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Seed for input generation and key-increase choices
    #[arg(long, env = "HEAP_BENCH_SEED")]
    pub seed: Option<u64>,

    /// Input shape to run (repeatable; default: all)
    #[arg(long = "shape", value_parser = parse_shape)]
    pub shapes: Vec<InputShape>,

    /// Scenario to run (repeatable; default: all)
    #[arg(long = "scenario", value_parser = parse_scenario)]
    pub scenarios: Vec<Scenario>,

    /// increaseKey performs max(1, n / DIVISOR) updates
    #[arg(long, value_name = "DIVISOR")]
    pub increase_key_divisor: Option<usize>,

    /// Legacy key=value arguments
    #[arg(value_name = "KEY=VALUE")]
    pub legacy: Vec<String>,
}

fn parse_shape(s: &str) -> Result<InputShape, ConfigError> {
    s.parse()
}

fn parse_scenario(s: &str) -> Result<Scenario, ConfigError> {
    s.parse()
}

impl CliArgs {
    /// Resolves the arguments into a validated [`BenchConfig`]
    ///
    /// # Errors
    /// Any [`ConfigError`] from legacy arguments or validation.
    pub fn into_config(self) -> Result<BenchConfig, ConfigError> {
        let mut config = BenchConfig::default();

        if !self.sizes.is_empty() {
            config.sizes = self.sizes;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if !self.shapes.is_empty() {
            config.shapes = self.shapes;
        }
        if !self.scenarios.is_empty() {
            config.scenarios = self.scenarios;
        }
        if let Some(divisor) = self.increase_key_divisor {
            config.increase_key_divisor = divisor;
        }

        for arg in &self.legacy {
            config.apply_legacy_arg(arg)?;
        }

        config.validate()?;
        Ok(config)
    }
}
