//! Error type for the funding pipeline.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a pipeline run.
///
/// All variants are fatal: the pipeline never produces a partial total.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input could not be opened or read.
    #[error("error reading '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input could be opened but a row could not be read.
    #[error("error reading '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The reader splits on single bytes, so only ASCII delimiters work.
    #[error("delimiter {delimiter:?} is not an ASCII character")]
    InvalidDelimiter { delimiter: char },

    /// The input had no first line to take column names from.
    #[error("input is empty, expected a header line")]
    MissingHeader,

    /// A configured column does not appear in the header (strict shape only).
    #[error("column '{column}' not found in header")]
    MissingColumn { column: String },

    /// A record is too short to carry a field the pipeline needs.
    #[error("line {line}: record has no '{field}' field")]
    MissingField { line: usize, field: String },

    /// Row length differs from header length under the strict row shape.
    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A selected record's numeric field is not an integer.
    #[error("line {line}: invalid integer {value:?} in '{field}': {source}")]
    Parse {
        line: usize,
        field: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The running total no longer fits in an `i64`.
    #[error("line {line}: total overflowed")]
    Overflow { line: usize },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PipelineError>;
