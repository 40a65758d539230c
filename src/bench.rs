//! Scenario driver
//!
//! Runs the heap through one of three standard workloads on a fresh heap and
//! fresh counters, and reports the elapsed wall-clock time together with the
//! final counter values.
//!
//! | Scenario      | Work performed                                               |
//! |---------------|--------------------------------------------------------------|
//! | `insert`      | insert every input value                                     |
//! | `extract`     | insert every value, then `extract_max` until empty           |
//! | `increaseKey` | insert every value, then `max(1, n / divisor)` random key increases |
//!
//! [`run_matrix`] drives the full `(size, shape, scenario)` grid described by a
//! [`BenchConfig`] and appends one [`MatrixRow`] per combination.

use crate::config::BenchConfig;
use crate::counters::{CounterSnapshot, OpCounters};
use crate::error::{BenchError, ConfigError, HeapError};
use crate::max_heap::MaxHeap;
use crate::report::{CsvReport, MatrixRow};
use crate::workload::{self, ValueRange};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::hint::black_box;
use std::io::Write;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Benchmark workload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Insert,
    Extract,
    IncreaseKey,
}

impl Scenario {
    /// All scenarios, in report order
    pub const ALL: [Scenario; 3] = [Scenario::Insert, Scenario::Extract, Scenario::IncreaseKey];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Insert => "insert",
            Scenario::Extract => "extract",
            Scenario::IncreaseKey => "increaseKey",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|scenario| scenario.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownScenario(s.to_string()))
    }
}

/// Tuning for the `increaseKey` scenario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOptions {
    /// Number of key increases is `max(1, n / increase_key_divisor)`
    pub increase_key_divisor: usize,
    /// Amount added to the chosen key, drawn uniformly; must be non-negative
    pub bump: RangeInclusive<i32>,
}

impl ScenarioOptions {
    /// Profile of the command-line harness: `n / 2` increases by `1..=1000`
    pub fn matrix() -> Self {
        Self {
            increase_key_divisor: 2,
            bump: 1..=1000,
        }
    }

    /// Profile of the micro-benchmarks: `n / 20` increases by `0..=99`
    pub fn micro() -> Self {
        Self {
            increase_key_divisor: 20,
            bump: 0..=99,
        }
    }

    /// Number of key increases performed for an input of size `n`
    pub fn increase_key_iterations(&self, n: usize) -> usize {
        (n / self.increase_key_divisor.max(1)).max(1)
    }
}

impl Default for ScenarioOptions {
    fn default() -> Self {
        Self::matrix()
    }
}

/// Result of one scenario run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    /// Input size
    pub n: usize,
    pub scenario: Scenario,
    /// Wall-clock time of the scenario body, inserts included
    pub elapsed: Duration,
    /// Wall-clock time of the measured operation alone: the inserts for
    /// [`Scenario::Insert`], the work after the inserts otherwise
    pub operation_elapsed: Duration,
    /// Counter values at the end of the run
    pub counters: CounterSnapshot,
}

/// Runs `scenario` over `data` on a fresh heap of capacity `data.len()`
///
/// The input slice and heap construction are outside the timed region.
///
/// # Errors
/// - [`HeapError::InvalidArgument`] if `data` is empty (zero-capacity heap)
///   or a negative bump lowers a key
pub fn run_scenario<R: Rng>(
    data: &[i32],
    scenario: Scenario,
    options: &ScenarioOptions,
    rng: &mut R,
) -> Result<ScenarioOutcome, HeapError> {
    let n = data.len();
    let mut counters = OpCounters::new();
    let mut heap = MaxHeap::with_capacity(n)?;

    let start = Instant::now();
    for &value in data {
        heap.insert(value, &mut counters);
    }
    let operation_start = match scenario {
        Scenario::Insert => start,
        Scenario::Extract | Scenario::IncreaseKey => Instant::now(),
    };

    match scenario {
        Scenario::Insert => {}
        Scenario::Extract => {
            while !heap.is_empty() {
                black_box(heap.extract_max(&mut counters)?);
            }
        }
        Scenario::IncreaseKey => {
            for _ in 0..options.increase_key_iterations(n) {
                let index = rng.gen_range(0..heap.len());
                let current = heap.value_at(index, &mut counters)?;
                let bump = rng.gen_range(options.bump.clone());
                heap.increase_key(index, current.saturating_add(bump), &mut counters)?;
            }
        }
    }
    let end = Instant::now();
    let elapsed = end - start;
    let operation_elapsed = end - operation_start;

    debug!(
        n,
        scenario = %scenario,
        elapsed_ns = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
        operation_ns = u64::try_from(operation_elapsed.as_nanos()).unwrap_or(u64::MAX),
        comparisons = counters.comparisons(),
        swaps = counters.swaps(),
        allocations = counters.allocations(),
        array_accesses = counters.array_accesses(),
        "Scenario finished"
    );

    Ok(ScenarioOutcome {
        n,
        scenario,
        elapsed,
        operation_elapsed,
        counters: counters.snapshot(),
    })
}

/// Summary of a [`run_matrix`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixSummary {
    /// Seed the run's RNG was built from
    pub seed: u64,
    /// Rows appended to the report
    pub rows: usize,
}

/// Runs every `(size, shape, scenario)` combination in `config`
///
/// A fresh input array is generated for each combination from a single RNG
/// seeded with `seed`, so the same seed and config reproduce the same inputs
/// and counter values.
///
/// # Errors
/// Returns [`BenchError::Heap`] if a scenario fails and [`BenchError::Report`]
/// if a row cannot be written. Rows already written stay in the report.
pub fn run_matrix<W: Write>(
    config: &BenchConfig,
    seed: u64,
    report: &mut CsvReport<MatrixRow, W>,
) -> Result<MatrixSummary, BenchError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let options = config.scenario_options();
    let mut rows = 0;

    for &n in &config.sizes {
        for &shape in &config.shapes {
            for &scenario in &config.scenarios {
                let data = workload::generate(n, shape, &ValueRange::Full, &mut rng);
                let outcome = run_scenario(&data, scenario, &options, &mut rng)
                    .map_err(|source| BenchError::Heap {
                        n,
                        scenario,
                        source,
                    })?;
                report.append(&MatrixRow::from_outcome(&outcome, shape))?;
                rows += 1;
            }
        }
        info!(n, rows, "Finished size");
    }
    report.flush()?;

    Ok(MatrixSummary { seed, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_scenario_names_round_trip() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.as_str().parse::<Scenario>(), Ok(scenario));
        }
        assert!("extractMax".parse::<Scenario>().is_err());
    }

    #[test]
    fn test_increase_key_iterations() {
        let matrix = ScenarioOptions::matrix();
        assert_eq!(matrix.increase_key_iterations(1), 1);
        assert_eq!(matrix.increase_key_iterations(100), 50);

        let micro = ScenarioOptions::micro();
        assert_eq!(micro.increase_key_iterations(10), 1);
        assert_eq!(micro.increase_key_iterations(1000), 50);
    }

    #[test]
    fn test_insert_scenario_counts() {
        let data = [10, 5, 30, 20];
        let outcome =
            run_scenario(&data, Scenario::Insert, &ScenarioOptions::default(), &mut rng())
                .unwrap();

        assert_eq!(outcome.n, 4);
        assert_eq!(outcome.scenario, Scenario::Insert);
        assert_eq!(outcome.counters.allocations, 0);
        assert_eq!(outcome.counters.max_depth, 1);
        // 10 | 5 vs 10 | 30 vs 10 | 20 vs 5, 20 vs 30
        assert_eq!(outcome.counters.comparisons, 4);
    }

    #[test]
    fn test_extract_scenario_drains_heap() {
        let data: Vec<i32> = (0..64).collect();
        let insert_only =
            run_scenario(&data, Scenario::Insert, &ScenarioOptions::default(), &mut rng())
                .unwrap();
        let extract =
            run_scenario(&data, Scenario::Extract, &ScenarioOptions::default(), &mut rng())
                .unwrap();

        assert!(extract.counters.comparisons > insert_only.counters.comparisons);
        assert!(extract.counters.array_accesses > insert_only.counters.array_accesses);
        assert_eq!(extract.counters.allocations, 0);
    }

    #[test]
    fn test_operation_time_excludes_setup_inserts() {
        let data: Vec<i32> = (0..256).collect();
        let options = ScenarioOptions::default();

        let insert = run_scenario(&data, Scenario::Insert, &options, &mut rng()).unwrap();
        assert_eq!(insert.operation_elapsed, insert.elapsed);

        for scenario in [Scenario::Extract, Scenario::IncreaseKey] {
            let outcome = run_scenario(&data, scenario, &options, &mut rng()).unwrap();
            assert!(outcome.operation_elapsed <= outcome.elapsed);
        }
    }

    #[test]
    fn test_increase_key_scenario_saturates() {
        let data = [i32::MAX - 1, i32::MAX, i32::MAX - 2];
        let outcome = run_scenario(
            &data,
            Scenario::IncreaseKey,
            &ScenarioOptions::matrix(),
            &mut rng(),
        );
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = run_scenario(&[], Scenario::Insert, &ScenarioOptions::default(), &mut rng());
        assert!(matches!(result, Err(HeapError::InvalidArgument(_))));
    }

    #[test]
    fn test_same_seed_same_counters() {
        let data: Vec<i32> = (0..200).map(|i| (i * 7919) % 1000).collect();
        let a = run_scenario(
            &data,
            Scenario::IncreaseKey,
            &ScenarioOptions::matrix(),
            &mut rng(),
        )
        .unwrap();
        let b = run_scenario(
            &data,
            Scenario::IncreaseKey,
            &ScenarioOptions::matrix(),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(a.counters, b.counters);
    }

    #[test]
    fn test_run_matrix_writes_every_combination() {
        let config = BenchConfig {
            sizes: vec![8, 32],
            ..BenchConfig::default()
        };
        let mut report = CsvReport::<MatrixRow, Vec<u8>>::from_writer(Vec::new(), true).unwrap();

        let summary = run_matrix(&config, 9, &mut report).unwrap();
        assert_eq!(summary.rows, 2 * 4 * 3);
        assert_eq!(summary.seed, 9);

        let text = String::from_utf8(report.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 24);
        assert!(lines[1].starts_with("8,insert,random,"));
        assert!(lines[24].starts_with("32,increaseKey,nearly-sorted,"));
    }
}
