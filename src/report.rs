//! CSV persistence for benchmark results
//!
//! Two row layouts are supported:
//!
//! - [`MatrixRow`]: one row per `(size, scenario, input shape)` run of the
//!   command-line harness
//!   (`n,scenario,inputType,time,comparisons,swaps,allocations,arrayAccesses,maxDepth`)
//! - [`AlgorithmRow`]: one row per micro-benchmark case
//!   (`algorithm,case,n,time_ns,comparisons,allocations,maxDepth`)
//!
//! Reports are opened in append mode. The header goes in only when the file
//! is new or empty, so repeated runs accumulate rows under a single header.
//! All fields are integers or fixed identifiers and are written unquoted.

use crate::bench::{Scenario, ScenarioOutcome};
use crate::counters::CounterSnapshot;
use crate::error::ReportError;
use crate::workload::InputShape;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::marker::PhantomData;
use std::path::Path;
use tracing::debug;

/// A record that can be written as one CSV line
pub trait CsvRow {
    /// Header line, without trailing newline
    const HEADER: &'static str;

    /// Writes the record followed by a newline
    fn write_row<W: Write>(&self, out: &mut W) -> io::Result<()>;
}

/// Row of the command-line harness report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    pub n: usize,
    pub scenario: Scenario,
    pub input: InputShape,
    pub time_ns: u128,
    pub counters: CounterSnapshot,
}

impl MatrixRow {
    /// Builds a row from a finished scenario run and the shape of its input
    pub fn from_outcome(outcome: &ScenarioOutcome, input: InputShape) -> Self {
        Self {
            n: outcome.n,
            scenario: outcome.scenario,
            input,
            time_ns: outcome.elapsed.as_nanos(),
            counters: outcome.counters,
        }
    }
}

impl CsvRow for MatrixRow {
    const HEADER: &'static str =
        "n,scenario,inputType,time,comparisons,swaps,allocations,arrayAccesses,maxDepth";

    fn write_row<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let c = &self.counters;
        writeln!(
            out,
            "{},{},{},{},{},{},{},{},{}",
            self.n,
            self.scenario,
            self.input,
            self.time_ns,
            c.comparisons,
            c.swaps,
            c.allocations,
            c.array_accesses,
            c.max_depth
        )
    }
}

/// Row of the per-algorithm micro-benchmark report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmRow {
    pub algorithm: String,
    pub case: String,
    pub n: usize,
    pub time_ns: u128,
    pub counters: CounterSnapshot,
}

impl AlgorithmRow {
    /// Builds a row timed on the measured operation only, excluding the
    /// insert phase that sets up extract and increase-key runs
    pub fn from_outcome(algorithm: &str, case: &str, outcome: &ScenarioOutcome) -> Self {
        Self {
            algorithm: algorithm.to_string(),
            case: case.to_string(),
            n: outcome.n,
            time_ns: outcome.operation_elapsed.as_nanos(),
            counters: outcome.counters,
        }
    }
}

impl CsvRow for AlgorithmRow {
    const HEADER: &'static str = "algorithm,case,n,time_ns,comparisons,allocations,maxDepth";

    fn write_row<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            self.algorithm,
            self.case,
            self.n,
            self.time_ns,
            self.counters.comparisons,
            self.counters.allocations,
            self.counters.max_depth
        )
    }
}

/// Typed CSV writer for one row layout
pub struct CsvReport<R: CsvRow, W: Write = BufWriter<File>> {
    out: W,
    rows_written: usize,
    _row: PhantomData<R>,
}

impl<R: CsvRow> CsvReport<R> {
    /// Opens `path` for appending, writing the header if the file is new or empty
    ///
    /// # Errors
    /// Returns [`ReportError::Io`] if the file cannot be opened or written.
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let needs_header = file.metadata()?.len() == 0;
        debug!(
            path = %path.display(),
            needs_header,
            "Opened report file"
        );
        Self::from_writer(BufWriter::new(file), needs_header)
    }
}

impl<R: CsvRow, W: Write> CsvReport<R, W> {
    /// Wraps an arbitrary writer
    ///
    /// # Errors
    /// Returns [`ReportError::Io`] if the header cannot be written.
    pub fn from_writer(mut out: W, write_header: bool) -> Result<Self, ReportError> {
        if write_header {
            writeln!(out, "{}", R::HEADER)?;
        }
        Ok(Self {
            out,
            rows_written: 0,
            _row: PhantomData,
        })
    }

    /// Appends one record
    ///
    /// # Errors
    /// Returns [`ReportError::Io`] on write failure.
    pub fn append(&mut self, row: &R) -> Result<(), ReportError> {
        row.write_row(&mut self.out)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Number of records appended through this report
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flushes buffered rows to the underlying writer
    ///
    /// # Errors
    /// Returns [`ReportError::Io`] on flush failure.
    pub fn flush(&mut self) -> Result<(), ReportError> {
        self.out.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying writer
    ///
    /// # Errors
    /// Returns [`ReportError::Io`] on flush failure.
    pub fn into_inner(mut self) -> Result<W, ReportError> {
        self.out.flush()?;
        Ok(self.out)
    }
}
