//! Tabular result to JSON encoding.
//!
//! Every row becomes a JSON object whose keys follow the row's own column
//! order; rows are not assumed to share a column set. A result with at least
//! one row encodes as a compact JSON array. An empty result encodes as the
//! literal `{}` rather than `[]`, which existing clients rely on.

use thiserror::Error;

use crate::executor::{RowCursor, RowDecodeError};
use crate::value::Row;

/// Body written for a result with no rows.
pub const EMPTY_RESULT_BODY: &[u8] = b"{}";

/// Failures while encoding a procedure result.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// A row could not be decoded from the cursor.
    #[error("failed to decode row {row}: {source}")]
    RowDecode {
        /// Zero-based index of the failing row.
        row: usize,
        #[source]
        source: RowDecodeError,
    },

    /// Decoded rows could not be represented as JSON.
    #[error("failed to encode result as JSON: {0}")]
    Encode(#[from] serde_json::Error),

    /// A column did not hold the type the caller required.
    #[error("column '{column}' holds {found}, expected {expected}")]
    UnexpectedValue {
        column: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Encodes every row of `cursor` as JSON.
///
/// The cursor is consumed and dropped before this returns, on success and on
/// failure alike. After a decode failure the remaining rows are still drained
/// so the storage layer sees a fully read result; the first failure is
/// reported.
///
/// # Errors
///
/// Returns [`SerializationError::RowDecode`] for the first undecodable row and
/// [`SerializationError::Encode`] when a value has no JSON form.
pub fn serialize_rows(mut cursor: Box<dyn RowCursor>) -> Result<Vec<u8>, SerializationError> {
    let collected = collect_rows(cursor.as_mut());
    drop(cursor);
    encode_rows(&collected?)
}

/// Encodes already decoded rows.
///
/// # Errors
///
/// Returns [`SerializationError::Encode`] when a value has no JSON form.
pub fn encode_rows(rows: &[Row]) -> Result<Vec<u8>, SerializationError> {
    if rows.is_empty() {
        return Ok(EMPTY_RESULT_BODY.to_vec());
    }
    Ok(serde_json::to_vec(rows)?)
}

fn collect_rows(cursor: &mut dyn RowCursor) -> Result<Vec<Row>, SerializationError> {
    let mut rows = Vec::new();
    let mut failure = None;
    let mut index = 0_usize;

    while let Some(next) = cursor.next_row() {
        match next {
            Ok(row) if failure.is_none() => rows.push(row),
            Ok(_) => {}
            Err(source) => {
                if failure.is_none() {
                    failure = Some(SerializationError::RowDecode { row: index, source });
                }
            }
        }
        index += 1;
    }

    match failure {
        Some(error) => Err(error),
        None => Ok(rows),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use rstest::rstest;

    use super::*;
    use crate::executor::RowSet;
    use crate::value::Value;

    /// Cursor that records how far it was read and whether it was released.
    struct TrackedCursor {
        inner: RowSet,
        reads: Arc<AtomicUsize>,
        released: Arc<AtomicBool>,
    }

    impl RowCursor for TrackedCursor {
        fn next_row(&mut self) -> Option<Result<Row, RowDecodeError>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.next_row()
        }
    }

    impl Drop for TrackedCursor {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    fn tracked(
        rows: Vec<Result<Row, RowDecodeError>>,
    ) -> (Box<dyn RowCursor>, Arc<AtomicUsize>, Arc<AtomicBool>) {
        let reads = Arc::new(AtomicUsize::new(0));
        let released = Arc::new(AtomicBool::new(false));
        let cursor = TrackedCursor {
            inner: RowSet::from_results(rows),
            reads: Arc::clone(&reads),
            released: Arc::clone(&released),
        };
        (Box::new(cursor), reads, released)
    }

    fn body(bytes: &[u8]) -> &str {
        std::str::from_utf8(bytes).expect("utf8 body")
    }

    #[test]
    fn empty_result_encodes_as_empty_object() {
        let encoded = serialize_rows(Box::new(RowSet::empty())).expect("encode");
        assert_eq!(body(&encoded), "{}");
    }

    #[test]
    fn single_row_encodes_as_one_element_array() {
        let rows = RowSet::new(vec![Row::new().with("user_id", 345_i64)]);
        let encoded = serialize_rows(Box::new(rows)).expect("encode");
        assert_eq!(body(&encoded), r#"[{"user_id":345}]"#);
    }

    #[test]
    fn rows_are_encoded_independently_in_result_order() {
        let rows = RowSet::new(vec![
            Row::new().with("a", 1_i64).with("b", "x"),
            Row::new().with("c", Value::Null),
        ]);
        let encoded = serialize_rows(Box::new(rows)).expect("encode");
        assert_eq!(body(&encoded), r#"[{"a":1,"b":"x"},{"c":null}]"#);
    }

    #[rstest]
    #[case::first_row(0)]
    #[case::middle_row(1)]
    #[case::last_row(2)]
    fn decode_failure_drains_and_releases_cursor(#[case] failing: usize) {
        let rows = (0..3)
            .map(|index| {
                if index == failing {
                    Err(RowDecodeError::new("column 'sort' is not a float"))
                } else {
                    Ok(Row::new().with("n", 1_i64))
                }
            })
            .collect();
        let (cursor, reads, released) = tracked(rows);

        let error = serialize_rows(cursor).expect_err("decode failure");

        assert!(matches!(error, SerializationError::RowDecode { row, .. } if row == failing));
        // Three rows plus the terminating `None`.
        assert_eq!(reads.load(Ordering::SeqCst), 4);
        assert!(released.load(Ordering::SeqCst), "cursor must be released");
    }

    #[test]
    fn cursor_is_released_after_success() {
        let (cursor, _, released) = tracked(vec![Ok(Row::new().with("n", 1_i64))]);
        serialize_rows(cursor).expect("encode");
        assert!(released.load(Ordering::SeqCst));
    }

    #[test]
    fn first_decode_failure_is_reported() {
        let rows = vec![
            Err(RowDecodeError::new("first")),
            Err(RowDecodeError::new("second")),
        ];
        let (cursor, _, _) = tracked(rows);
        let error = serialize_rows(cursor).expect_err("decode failure");
        assert!(error.to_string().contains("first"));
    }

    #[test]
    fn non_finite_float_is_a_serialization_error() {
        let (cursor, _, released) = tracked(vec![Ok(Row::new().with("ratio", f64::INFINITY))]);
        let error = serialize_rows(cursor).expect_err("infinity has no JSON form");
        assert!(matches!(error, SerializationError::Encode(_)));
        assert!(released.load(Ordering::SeqCst));
    }
}
