//! Inbound command requests.
//!
//! The transport hands the dispatcher a request path plus decoded form
//! parameters. [`CommandRequest::parse`] accepts a request target such as
//! `/cmd/entity.category_list?p=1`; form-encoded bodies are merged with
//! [`CommandRequest::with_body`].

use crate::form::FormParameters;

/// A command invocation as seen by the dispatcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRequest {
    path: String,
    form: FormParameters,
}

impl CommandRequest {
    /// Builds a request from a path and already-decoded parameters.
    #[must_use]
    pub fn new(path: impl Into<String>, form: FormParameters) -> Self {
        Self {
            path: path.into(),
            form,
        }
    }

    /// Parses a request target of the form `path[?query][#fragment]`.
    #[must_use]
    pub fn parse(target: &str) -> Self {
        let without_fragment = target.split_once('#').map_or(target, |(head, _)| head);
        match without_fragment.split_once('?') {
            Some((path, query)) => Self::new(path, FormParameters::parse(query.as_bytes())),
            None => Self::new(without_fragment, FormParameters::new()),
        }
    }

    /// Merges a form-encoded request body.
    ///
    /// Body values precede query values supplied under the same key.
    #[must_use]
    pub fn with_body(mut self, body: &[u8]) -> Self {
        let mut merged = FormParameters::parse(body);
        merged.merge(self.form);
        self.form = merged;
        self
    }

    /// Request path, including the command prefix.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Decoded form parameters.
    #[must_use]
    pub fn form(&self) -> &FormParameters {
        &self.form
    }
}
