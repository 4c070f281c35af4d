//! Error types for command dispatch failures.
//!
//! Every variant aborts the dispatch it was raised in; no body is written.
//! The transport that called the dispatcher decides how to present the
//! failure, typically using [`DispatchError::status_code`].

use std::io;

use thiserror::Error;

use crate::binder::BindError;
use crate::executor::ExecutionError;
use crate::registry::ParameterKind;
use crate::serializer::SerializationError;

/// Stages of the dispatch state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStage {
    /// Command name resolution against the registry.
    Resolve,
    /// Calling-method check and parameter extraction.
    MethodGate,
    /// Parameter validation and coercion.
    Bind,
    /// Procedure execution.
    Execute,
    /// Result encoding.
    Serialize,
    /// Writing the response body.
    Respond,
}

impl DispatchStage {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resolve => "resolve",
            Self::MethodGate => "method_gate",
            Self::Bind => "bind",
            Self::Execute => "execute",
            Self::Serialize => "serialize",
            Self::Respond => "respond",
        }
    }
}

/// Errors surfaced while dispatching a command.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No descriptor matches the requested command.
    #[error("command descriptor '{command}' not found")]
    NotFound { command: String },

    /// The command declares a recognised method that cannot be called here.
    #[error("command '{command}' declares call method '{method}', which cannot be invoked by request")]
    UnsupportedMethod { command: String, method: String },

    /// The command declares a method outside the known set.
    #[error("command '{command}' declares unknown call method '{method}'")]
    UnknownMethod { command: String, method: String },

    /// The request carried more distinct parameters than allowed.
    #[error("too many parameters: {count} supplied, at most {limit} accepted")]
    TooManyParameters { count: usize, limit: usize },

    /// A declared parameter had neither a value nor a default.
    #[error("parameter '{parameter}' not found")]
    MissingParameter { parameter: String },

    /// A declared parameter was supplied more than once.
    #[error("parameter '{parameter}' supplied {count} times; only one value is accepted")]
    MultipleValues { parameter: String, count: usize },

    /// A parameter value did not parse as its declared type.
    #[error("parameter '{parameter}' value '{value}' is not a valid {kind}: {reason}")]
    TypeCoercion {
        parameter: String,
        kind: ParameterKind,
        value: String,
        reason: String,
    },

    /// The executor failed to run the procedure. The message is the
    /// executor's own, unchanged.
    #[error("{source}")]
    Execution {
        procedure: String,
        #[source]
        source: ExecutionError,
    },

    /// The procedure result could not be encoded.
    #[error("failed to serialize result: {0}")]
    Serialization(#[from] SerializationError),

    /// A procedure that must return a row returned none.
    #[error("command '{command}' returned no rows")]
    EmptyResult { command: String },

    /// Writing the response body failed.
    #[error("failed to write response: {0}")]
    Io(#[from] io::Error),
}

impl DispatchError {
    /// Stage of the state machine that raised the error.
    #[must_use]
    pub const fn stage(&self) -> DispatchStage {
        match self {
            Self::NotFound { .. } => DispatchStage::Resolve,
            Self::UnsupportedMethod { .. } | Self::UnknownMethod { .. } => {
                DispatchStage::MethodGate
            }
            Self::TooManyParameters { .. }
            | Self::MissingParameter { .. }
            | Self::MultipleValues { .. }
            | Self::TypeCoercion { .. } => DispatchStage::Bind,
            Self::Execution { .. } | Self::EmptyResult { .. } => DispatchStage::Execute,
            Self::Serialization(_) => DispatchStage::Serialize,
            Self::Io(_) => DispatchStage::Respond,
        }
    }

    /// Conventional HTTP status for the failure.
    ///
    /// Caller mistakes map to 4xx; descriptor misconfiguration, storage, and
    /// encoding failures map to 5xx.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::TooManyParameters { .. }
            | Self::MissingParameter { .. }
            | Self::MultipleValues { .. }
            | Self::TypeCoercion { .. } => 400,
            Self::UnsupportedMethod { .. } => 501,
            Self::Execution { .. } => 502,
            Self::UnknownMethod { .. }
            | Self::Serialization(_)
            | Self::EmptyResult { .. }
            | Self::Io(_) => 500,
        }
    }

    /// Creates a not-found error.
    pub fn not_found(command: impl Into<String>) -> Self {
        Self::NotFound {
            command: command.into(),
        }
    }

    /// Creates an execution error for `procedure`.
    pub fn execution(procedure: impl Into<String>, source: ExecutionError) -> Self {
        Self::Execution {
            procedure: procedure.into(),
            source,
        }
    }
}

impl From<BindError> for DispatchError {
    fn from(error: BindError) -> Self {
        match error {
            BindError::TooManyParameters { count, limit } => {
                Self::TooManyParameters { count, limit }
            }
            BindError::MissingParameter { parameter } => Self::MissingParameter { parameter },
            BindError::MultipleValues { parameter, count } => {
                Self::MultipleValues { parameter, count }
            }
            BindError::TypeCoercion {
                parameter,
                kind,
                value,
                reason,
            } => Self::TypeCoercion {
                parameter,
                kind,
                value,
                reason,
            },
        }
    }
}
