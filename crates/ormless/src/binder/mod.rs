//! Descriptor-driven parameter binding.
//!
//! The binder validates a decoded form against a command descriptor and
//! produces typed arguments in declared order. It performs no I/O and keeps no
//! state between calls, so one instance serves every request.

mod coerce;
mod errors;

use ormless_config::{Config, MultiValuePolicy};

use crate::arguments::BoundArguments;
use crate::form::FormParameters;
use crate::registry::{CommandDescriptor, ParameterDescriptor};

pub use self::errors::BindError;

/// Binds raw request parameters to a descriptor's typed parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterBinder {
    limit: usize,
    policy: MultiValuePolicy,
}

impl ParameterBinder {
    /// Creates a binder accepting at most `limit` distinct parameter keys.
    #[must_use]
    pub const fn new(limit: usize, policy: MultiValuePolicy) -> Self {
        Self { limit, policy }
    }

    /// Creates a binder from the shared configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.parameters_count_limit(), config.multi_value_policy())
    }

    /// Configured ceiling on distinct parameter keys.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Binds `form` to `descriptor`.
    ///
    /// Position 0 of the result is left unset; dispatch fills it with the
    /// caller identity.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::TooManyParameters`] before looking at any value
    /// when the form has more keys than the limit. Otherwise the first
    /// parameter that is missing, repeated (under
    /// [`MultiValuePolicy::Reject`]), or fails to parse aborts binding.
    pub fn bind(
        &self,
        descriptor: &CommandDescriptor,
        form: &FormParameters,
    ) -> Result<BoundArguments, BindError> {
        if form.len() > self.limit {
            return Err(BindError::TooManyParameters {
                count: form.len(),
                limit: self.limit,
            });
        }

        let mut arguments = BoundArguments::new();
        for parameter in descriptor.parameters() {
            let raw = self.raw_value(parameter, form)?;
            let value = coerce::coerce(parameter.kind(), &raw).map_err(|reason| {
                BindError::TypeCoercion {
                    parameter: parameter.name().to_owned(),
                    kind: parameter.kind(),
                    value: raw.clone(),
                    reason,
                }
            })?;
            arguments.push(parameter.name(), value);
        }
        Ok(arguments)
    }

    fn raw_value(
        &self,
        parameter: &ParameterDescriptor,
        form: &FormParameters,
    ) -> Result<String, BindError> {
        match form.get(parameter.name()) {
            Some([single]) => Ok(single.clone()),
            Some(values) => match self.policy {
                MultiValuePolicy::Concatenate => Ok(values.concat()),
                MultiValuePolicy::Reject => Err(BindError::MultipleValues {
                    parameter: parameter.name().to_owned(),
                    count: values.len(),
                }),
            },
            None => parameter
                .default_value()
                .map(str::to_owned)
                .ok_or_else(|| BindError::MissingParameter {
                    parameter: parameter.name().to_owned(),
                }),
        }
    }
}
