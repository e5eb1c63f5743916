//! Batch solving and result reporting.
//!
//! Runs a set of methods over many instances, recording per-instance
//! failures instead of aborting, and hands the records to a [`ResultSink`].
//!
//! - [`BatchConfig`] — Methods to run, parallelism, per-instance time budget
//! - [`solve_batch`] — Instance × method driver (optionally on rayon)
//! - [`ResultSink`] — Destination for records ([`MemorySink`], `CsvSink`)
//! - [`BatchSummary`] — Per size class and method aggregates

mod config;
mod driver;
mod sink;
mod summary;

pub use config::BatchConfig;
pub use driver::{solve_batch, BatchError, BatchRecord};
#[cfg(feature = "csv-format")]
pub use sink::CsvSink;
pub use sink::{write_records, MemorySink, ResultSink, SinkError};
pub use summary::{BatchSummary, SizeClass, SummaryRow};
