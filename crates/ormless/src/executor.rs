//! Storage executor boundary.
//!
//! The gateway never talks to a database directly. An [`Executor`] runs a
//! named procedure with bound arguments and hands back a [`RowCursor`] over
//! the result. Dropping the cursor releases whatever the storage layer holds
//! for it, so callers own the cursor for exactly one dispatch.

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

use crate::arguments::BoundArguments;
use crate::value::Row;

/// Runs stored procedures on behalf of the dispatcher.
pub trait Executor: Send + Sync {
    /// Executes `procedure` with `arguments` passed as name/value pairs.
    ///
    /// When dispatching a command, the first argument is always the caller
    /// identity named [`crate::CALLER_IDENTITY_ARGUMENT`].
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] when the procedure cannot be run.
    fn execute(
        &self,
        procedure: &str,
        arguments: &BoundArguments,
    ) -> Result<Box<dyn RowCursor>, ExecutionError>;
}

impl<T> Executor for Arc<T>
where
    T: Executor + ?Sized,
{
    fn execute(
        &self,
        procedure: &str,
        arguments: &BoundArguments,
    ) -> Result<Box<dyn RowCursor>, ExecutionError> {
        (**self).execute(procedure, arguments)
    }
}

/// Forward-only cursor over a procedure result.
///
/// Each row is decoded independently; a decode failure affects only the row it
/// is reported for. Implementations release storage resources on drop.
pub trait RowCursor: Send {
    /// Decodes the next row, or returns `None` once the result is exhausted.
    fn next_row(&mut self) -> Option<Result<Row, RowDecodeError>>;
}

/// A row could not be decoded from the storage representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RowDecodeError {
    message: String,
}

impl RowDecodeError {
    /// Creates a decode error with a description of the failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// A procedure call failed inside the executor.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExecutionError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ExecutionError {
    /// Creates an execution error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an execution error wrapping an underlying driver error.
    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Fully materialised result usable as a [`RowCursor`].
///
/// Executors that buffer results (and test doubles) return this directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    rows: VecDeque<Result<Row, RowDecodeError>>,
}

impl RowSet {
    /// Creates a cursor over successfully decoded rows.
    #[must_use]
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: rows.into_iter().map(Ok).collect(),
        }
    }

    /// Creates a cursor that also replays per-row decode failures.
    #[must_use]
    pub fn from_results(rows: Vec<Result<Row, RowDecodeError>>) -> Self {
        Self { rows: rows.into() }
    }

    /// Creates a cursor over an empty result.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rows not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl RowCursor for RowSet {
    fn next_row(&mut self) -> Option<Result<Row, RowDecodeError>> {
        self.rows.pop_front()
    }
}
