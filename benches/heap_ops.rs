//! Max-heap micro-benchmarks
//!
//! Times insert, extract-all and increase-key on small seeded inputs with
//! Criterion, then runs one instrumented pass per case and appends its
//! operation counts to `target/benchmarks.csv`
//! (`algorithm,case,n,time_ns,comparisons,allocations,maxDepth`).
//! `time_ns` covers only the measured operation; the counters also include
//! the inserts that build the heap for the extract and increase-key cases.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench heap_ops
//!
//! # Only the extract cases
//! cargo bench --bench heap_ops -- extractMax
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use instrumented_heap::bench::{run_scenario, Scenario, ScenarioOptions};
use instrumented_heap::report::{AlgorithmRow, CsvReport};
use instrumented_heap::workload::{generate, InputShape, ValueRange};
use instrumented_heap::{MaxHeap, OpCounters};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

const SIZES: [usize; 3] = [50, 200, 1000];
const SEED: u64 = 42;
const REPORT_PATH: &str = "target/benchmarks.csv";

fn input(n: usize) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(SEED);
    generate(n, InputShape::Random, &ValueRange::Scaled { factor: 10 }, &mut rng)
}

fn filled_heap(data: &[i32], counters: &mut OpCounters) -> MaxHeap {
    let mut heap = MaxHeap::with_capacity(data.len()).expect("sizes are positive");
    for &value in data {
        heap.insert(value, counters);
    }
    heap
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for n in SIZES {
        let data = input(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            b.iter(|| {
                let mut counters = OpCounters::new();
                black_box(filled_heap(data, &mut counters))
            });
        });
    }
    group.finish();
}

fn bench_extract_max(c: &mut Criterion) {
    let mut group = c.benchmark_group("extractMax");
    for n in SIZES {
        let data = input(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            b.iter_batched(
                || {
                    let mut counters = OpCounters::new();
                    (filled_heap(data, &mut counters), counters)
                },
                |(mut heap, mut counters)| {
                    while let Ok(max) = heap.extract_max(&mut counters) {
                        black_box(max);
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_increase_key(c: &mut Criterion) {
    let options = ScenarioOptions::micro();
    let mut group = c.benchmark_group("increaseKey");
    for n in SIZES {
        let data = input(n);
        let iterations = options.increase_key_iterations(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            let mut rng = StdRng::seed_from_u64(SEED);
            b.iter_batched(
                || {
                    let mut counters = OpCounters::new();
                    (filled_heap(data, &mut counters), counters)
                },
                |(mut heap, mut counters)| {
                    for _ in 0..iterations {
                        let index = rng.gen_range(0..heap.len());
                        let current = heap
                            .value_at(index, &mut counters)
                            .expect("index drawn below len");
                        let new_value = current.saturating_add(rng.gen_range(options.bump.clone()));
                        heap.increase_key(index, new_value, &mut counters)
                            .expect("bump is non-negative");
                    }
                    black_box(heap)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

/// Appends one instrumented pass per case to the counts report
fn record_operation_counts(_c: &mut Criterion) {
    let mut report = match CsvReport::<AlgorithmRow>::append_to(REPORT_PATH) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Skipping operation-count report: {}", e);
            return;
        }
    };

    let options = ScenarioOptions::micro();
    let cases = [
        (Scenario::Insert, "insert"),
        (Scenario::Extract, "extractMax"),
        (Scenario::IncreaseKey, "increaseKey"),
    ];

    for n in SIZES {
        let data = input(n);
        for (scenario, case) in cases {
            let mut rng = StdRng::seed_from_u64(SEED);
            let outcome = run_scenario(&data, scenario, &options, &mut rng)
                .expect("seeded micro-benchmark inputs are valid");
            let row = AlgorithmRow::from_outcome("MaxHeap", case, &outcome);
            if let Err(e) = report.append(&row) {
                eprintln!("Failed to record {} n={}: {}", case, n, e);
            }
        }
    }

    if let Err(e) = report.flush() {
        eprintln!("Failed to flush {}: {}", REPORT_PATH, e);
    }
}

criterion_group!(
    benches,
    bench_insert,
    bench_extract_max,
    bench_increase_key,
    record_operation_counts
);
criterion_main!(benches);
