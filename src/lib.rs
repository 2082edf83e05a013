//! Plain-text spaced-repetition review tracker.
//!
//! Tasks live in one `<user>.srs` file per user. The scheduler decides which
//! tasks are due and moves them along an escalating interval ladder as they
//! are reviewed.

pub mod domain;
pub mod error;
pub mod persistence;
pub mod prompt;
pub mod scheduler;
pub mod session;

pub use error::{IntervalError, LadderError, RecordError, StoreError, TaskTextError};
