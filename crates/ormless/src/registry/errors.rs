//! Errors raised while loading, validating, and querying descriptors.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Descriptor registry failures.
///
/// `Read` and `Malformed` are load errors; `UnsupportedType`,
/// `DuplicateCommand`, and `ReservedParameter` are validation errors. Both
/// groups are fatal at startup. `NotFound` is raised per lookup.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The descriptor source could not be opened or read.
    #[error("failed to read descriptor source '{path}': {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    /// The descriptor source is not a valid descriptor list.
    #[error("malformed descriptor source: {source}")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    /// A parameter declares a type outside the supported set.
    #[error("command '{command}' parameter '{parameter}' type '{type_name}' is not supported")]
    UnsupportedType {
        command: String,
        parameter: String,
        type_name: String,
    },

    /// Two descriptors share a command name.
    #[error("command '{command}' is declared more than once")]
    DuplicateCommand { command: String },

    /// A parameter reuses the name reserved for the caller identity.
    #[error("command '{command}' parameter '{parameter}' uses a reserved argument name")]
    ReservedParameter { command: String, parameter: String },

    /// No descriptor carries the requested name.
    #[error("command descriptor '{command}' not found")]
    NotFound { command: String },
}

impl RegistryError {
    /// Returns true for failures that stop the descriptor source being read.
    #[must_use]
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Malformed { .. })
    }

    /// Returns true for descriptor content that failed validation.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedType { .. }
                | Self::DuplicateCommand { .. }
                | Self::ReservedParameter { .. }
        )
    }

    /// Creates a not-found error.
    pub fn not_found(command: impl Into<String>) -> Self {
        Self::NotFound {
            command: command.into(),
        }
    }
}
