//! Error types for heap operations and the benchmark harness
//!
//! Heap engine failures ([`HeapError`]) are always detected before the heap is
//! touched, so a caller that receives one can keep using the heap as-is.

use crate::bench::Scenario;
use thiserror::Error;

/// Error type for heap operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// An argument was rejected: zero capacity at construction, or a key
    /// update that would lower the value
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The index does not refer to a live element
    #[error("index {index} out of range for heap of size {len}")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Heap size at the time of the call
        len: usize,
    },

    /// The operation needs at least one element
    #[error("heap is empty")]
    Empty,
}

/// Errors raised while persisting benchmark records
#[derive(Error, Debug)]
pub enum ReportError {
    /// I/O errors on the output file
    #[error("I/O error writing report: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while assembling a [`BenchConfig`](crate::config::BenchConfig)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Size list could not be parsed
    #[error("invalid size list {0:?}: expected comma-separated positive integers")]
    InvalidSizes(String),

    /// Input shape name not recognised
    #[error("unknown input shape {0:?} (expected random, sorted, reversed or nearly-sorted)")]
    UnknownShape(String),

    /// Scenario name not recognised
    #[error("unknown scenario {0:?} (expected insert, extract or increaseKey)")]
    UnknownScenario(String),

    /// A positional argument was not of the form `key=value`
    #[error("unrecognised argument {0:?}")]
    UnknownArgument(String),

    /// Configuration is well-formed but unusable
    #[error("configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Failure of a full benchmark run
#[derive(Error, Debug)]
pub enum BenchError {
    /// A heap operation failed inside a scenario
    #[error("scenario {scenario} failed for n={n}: {source}")]
    Heap {
        n: usize,
        scenario: Scenario,
        #[source]
        source: HeapError,
    },

    /// The report could not be written
    #[error(transparent)]
    Report(#[from] ReportError),
}
