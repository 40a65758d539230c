//! Operation counters threaded through heap operations
//!
//! [`OpCounters`] is the per-run instrumentation context. Every heap operation
//! takes it by `&mut` and charges it for the work it performs:
//!
//! | Counter          | Charged for                                              |
//! |------------------|----------------------------------------------------------|
//! | `comparisons`    | each key comparison made while sifting                   |
//! | `swaps`          | each value relocated one level along a sift path         |
//! | `allocations`    | each capacity-doubling growth of the backing buffer      |
//! | `array_accesses` | each read or write of a heap slot                        |
//! | `max_depth`      | largest depth value reported via [`OpCounters::update_depth`] |
//!
//! Counters are never global: a benchmark scenario builds a fresh context (or
//! calls [`OpCounters::reset`]) at its boundary.
//!
//! # Example
//!
//! ```rust
//! use instrumented_heap::{MaxHeap, OpCounters};
//!
//! let mut counters = OpCounters::new();
//! let mut heap = MaxHeap::with_capacity(4).unwrap();
//! heap.insert(10, &mut counters);
//! heap.insert(30, &mut counters);
//!
//! assert_eq!(counters.comparisons(), 1);
//! assert_eq!(counters.swaps(), 1);
//! assert_eq!(counters.max_depth(), 1);
//! ```

use serde::Serialize;
use std::fmt;

/// Mutable set of operation counters for one benchmark run
///
/// Increments saturate at `u64::MAX` instead of wrapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpCounters {
    comparisons: u64,
    swaps: u64,
    allocations: u64,
    array_accesses: u64,
    max_depth: u64,
    current_depth: u64,
}

impl OpCounters {
    /// Creates a context with every counter at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_comparison(&mut self) {
        self.comparisons = self.comparisons.saturating_add(1);
    }

    #[inline]
    pub fn record_swap(&mut self) {
        self.swaps = self.swaps.saturating_add(1);
    }

    #[inline]
    pub fn record_allocation(&mut self) {
        self.allocations = self.allocations.saturating_add(1);
    }

    #[inline]
    pub fn record_array_access(&mut self) {
        self.record_array_accesses(1);
    }

    /// Charges `n` slot reads/writes at once
    #[inline]
    pub fn record_array_accesses(&mut self, n: u64) {
        self.array_accesses = self.array_accesses.saturating_add(n);
    }

    /// Sets the current depth and raises `max_depth` if it is exceeded
    #[inline]
    pub fn update_depth(&mut self, depth: u64) {
        self.current_depth = depth;
        if depth > self.max_depth {
            self.max_depth = depth;
        }
    }

    /// Zeroes every counter, including the current depth
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    pub fn array_accesses(&self) -> u64 {
        self.array_accesses
    }

    pub fn max_depth(&self) -> u64 {
        self.max_depth
    }

    pub fn current_depth(&self) -> u64 {
        self.current_depth
    }

    /// Captures the persisted counters as a plain value
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            comparisons: self.comparisons,
            swaps: self.swaps,
            allocations: self.allocations,
            array_accesses: self.array_accesses,
            max_depth: self.max_depth,
        }
    }
}

/// Frozen counter values, as written to a report row
///
/// Serializes with the same field names as the CSV columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterSnapshot {
    /// Key comparisons
    pub comparisons: u64,
    /// Single-level value relocations
    pub swaps: u64,
    /// Growth events
    pub allocations: u64,
    /// Slot reads and writes
    pub array_accesses: u64,
    /// Largest recorded depth
    pub max_depth: u64,
}

impl fmt::Display for CounterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "comparisons: {}, swaps: {}, allocations: {}, array accesses: {}, max depth: {}",
            self.comparisons, self.swaps, self.allocations, self.array_accesses, self.max_depth
        )
    }
}
