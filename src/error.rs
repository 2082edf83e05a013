//! Error types for the task store and scheduler.
//!
//! The CLI layer wraps these in `anyhow` with extra context.

use std::path::PathBuf;
use thiserror::Error;

/// A token that is not a valid review interval
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid interval {0:?}: expected a day count, <n>m, <n>h, <n>w or -1")]
pub struct IntervalError(pub String);

/// Failure to decode a single `.srs` record line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Wrong number of `|`-separated fields
    #[error("malformed record: expected 5 fields, found {fields}")]
    MalformedRecord { fields: usize },

    /// A create/update field that is not an RFC 3339 timestamp
    #[error("invalid {field} timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    InvalidInterval(#[from] IntervalError),
}

/// Task text that cannot be stored in a single `.srs` record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskTextError {
    #[error("{field} cannot contain the field separator '|'")]
    Separator { field: &'static str },

    #[error("{field} cannot contain line breaks")]
    LineBreak { field: &'static str },
}

/// Failure to load or save a task collection
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("line {line}")]
    Decode {
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An unusable interval ladder
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LadderError {
    #[error("ladder must have at least one step")]
    Empty,

    #[error("ladder step {index} is the inactive sentinel")]
    InactiveStep { index: usize },

    #[error("ladder step {index} ({step}) is not longer than the step before it")]
    NotAscending { index: usize, step: String },
}
