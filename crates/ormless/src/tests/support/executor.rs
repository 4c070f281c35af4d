//! Recording executor that serves canned results per procedure.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::arguments::BoundArguments;
use crate::executor::{ExecutionError, Executor, RowCursor, RowDecodeError, RowSet};
use crate::value::{Row, Value};

/// A procedure invocation observed by the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub procedure: String,
    pub arguments: Vec<(String, Value)>,
}

impl RecordedCall {
    /// Argument names in the order they were passed.
    #[must_use]
    pub fn argument_names(&self) -> Vec<&str> {
        self.arguments.iter().map(|(name, _)| name.as_str()).collect()
    }
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<RecordedCall>,
    results: HashMap<String, Vec<Result<Row, RowDecodeError>>>,
    failures: HashMap<String, String>,
}

/// Executor double shared between the test world and the dispatcher.
///
/// Procedures without a configured result return no rows.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    state: Arc<Mutex<State>>,
    released: Arc<AtomicUsize>,
}

impl RecordingExecutor {
    /// Serves `rows` for every call to `procedure`.
    pub fn respond_with(&self, procedure: &str, rows: Vec<Row>) {
        self.lock()
            .results
            .insert(procedure.to_owned(), rows.into_iter().map(Ok).collect());
    }

    /// Serves rows where the row at `index` fails to decode.
    pub fn respond_with_broken_row(&self, procedure: &str, rows: Vec<Row>, index: usize) {
        let mut results: Vec<_> = rows.into_iter().map(Ok).collect();
        results.insert(index, Err(RowDecodeError::new("column type mismatch")));
        self.lock().results.insert(procedure.to_owned(), results);
    }

    /// Makes every call to `procedure` fail with `message`.
    pub fn fail_on(&self, procedure: &str, message: &str) {
        self.lock()
            .failures
            .insert(procedure.to_owned(), message.to_owned());
    }

    /// Snapshot of the calls observed so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Number of cursors handed out and since dropped.
    #[must_use]
    pub fn released_cursors(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("executor state mutex poisoned")
    }
}

impl Executor for RecordingExecutor {
    fn execute(
        &self,
        procedure: &str,
        arguments: &BoundArguments,
    ) -> Result<Box<dyn RowCursor>, ExecutionError> {
        let mut state = self.lock();
        state.calls.push(RecordedCall {
            procedure: procedure.to_owned(),
            arguments: arguments
                .iter()
                .map(|argument| (argument.name().to_owned(), argument.value().clone()))
                .collect(),
        });
        if let Some(message) = state.failures.get(procedure) {
            return Err(ExecutionError::new(message.clone()));
        }
        let rows = state.results.get(procedure).cloned().unwrap_or_default();
        Ok(Box::new(ReleaseTrackingCursor {
            rows: RowSet::from_results(rows),
            released: Arc::clone(&self.released),
        }))
    }
}

struct ReleaseTrackingCursor {
    rows: RowSet,
    released: Arc<AtomicUsize>,
}

impl RowCursor for ReleaseTrackingCursor {
    fn next_row(&mut self) -> Option<Result<Row, RowDecodeError>> {
        self.rows.next_row()
    }
}

impl Drop for ReleaseTrackingCursor {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
