//! Instrumented Max-Heap and Benchmark Harness
//!
//! This crate provides an array-backed binary max-heap over `i32` keys whose
//! every operation reports its algorithmic cost (comparisons, relocations,
//! slot accesses, growth events, sift invocations) to a caller-owned counter
//! context, plus the harness that drives it through standard workloads and
//! writes the results to CSV for offline complexity analysis.
//!
//! # Modules
//!
//! - [`max_heap`]: the heap engine, [`MaxHeap`]
//! - [`counters`]: the per-run counter context, [`OpCounters`]
//! - [`workload`]: seeded input generation in four shapes
//! - [`bench`]: scenario driver (`insert`, `extract`, `increaseKey`)
//! - [`report`]: CSV rows and the append-mode report writer
//! - [`config`]: benchmark configuration and the command-line interface
//!
//! # Example
//!
//! ```rust
//! use instrumented_heap::{MaxHeap, OpCounters};
//!
//! let mut counters = OpCounters::new();
//! let mut heap = MaxHeap::with_capacity(1).unwrap();
//! heap.insert(1, &mut counters);
//! heap.insert(2, &mut counters);
//! heap.insert(3, &mut counters);
//!
//! assert_eq!(heap.len(), 3);
//! assert_eq!(heap.peek(&mut counters), Ok(3));
//! assert_eq!(counters.allocations(), 2);
//! ```

pub mod bench;
pub mod config;
pub mod counters;
pub mod error;
pub mod max_heap;
pub mod report;
pub mod workload;

pub use counters::{CounterSnapshot, OpCounters};
pub use error::HeapError;
pub use max_heap::MaxHeap;
