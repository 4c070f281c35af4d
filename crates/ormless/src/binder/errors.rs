//! Binding failures.

use thiserror::Error;

use crate::registry::ParameterKind;

/// Errors raised while turning request parameters into bound arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The request carried more distinct keys than allowed.
    #[error("too many parameters: {count} supplied, at most {limit} accepted")]
    TooManyParameters { count: usize, limit: usize },

    /// A declared parameter had neither a value nor a default.
    #[error("parameter '{parameter}' not found")]
    MissingParameter { parameter: String },

    /// A declared parameter was supplied more than once.
    #[error("parameter '{parameter}' supplied {count} times; only one value is accepted")]
    MultipleValues { parameter: String, count: usize },

    /// The value could not be parsed as the declared type.
    #[error("parameter '{parameter}' value '{value}' is not a valid {kind}: {reason}")]
    TypeCoercion {
        parameter: String,
        kind: ParameterKind,
        value: String,
        reason: String,
    },
}
