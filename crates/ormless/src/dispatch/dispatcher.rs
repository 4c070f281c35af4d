//! Command dispatch state machine.
//!
//! A dispatch runs `Resolve → MethodGate → Bind → Execute → Serialize →
//! Respond` and stops at the first failure. Nothing is written to the
//! response unless every earlier stage succeeded.

use std::io::Write;
use std::sync::Arc;

use ormless_config::Config;
use tracing::{debug, warn};

use crate::arguments::CallerId;
use crate::binder::ParameterBinder;
use crate::executor::Executor;
use crate::form::FormParameters;
use crate::registry::{CallMethod, CommandDescriptor, Registry};
use crate::serializer::serialize_rows;

use super::errors::{DispatchError, DispatchStage};
use super::request::CommandRequest;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Turns command requests into procedure calls and JSON bodies.
///
/// The dispatcher holds only immutable state, so a single instance can be
/// shared across threads behind an [`Arc`].
#[derive(Debug)]
pub struct Dispatcher<E> {
    registry: Arc<Registry>,
    binder: ParameterBinder,
    command_path_prefix: String,
    executor: E,
}

impl<E> Dispatcher<E> {
    /// Creates a dispatcher from its collaborators.
    pub fn new(
        registry: Arc<Registry>,
        binder: ParameterBinder,
        command_path_prefix: impl Into<String>,
        executor: E,
    ) -> Self {
        Self {
            registry,
            binder,
            command_path_prefix: command_path_prefix.into(),
            executor,
        }
    }

    /// Creates a dispatcher using the prefix and binding limits from `config`.
    pub fn from_config(config: &Config, registry: Arc<Registry>, executor: E) -> Self {
        Self::new(
            registry,
            ParameterBinder::from_config(config),
            config.command_path_prefix(),
            executor,
        )
    }

    /// Descriptor registry consulted on every dispatch.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Executor that runs procedures.
    #[must_use]
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Prefix stripped from request paths.
    #[must_use]
    pub fn command_path_prefix(&self) -> &str {
        self.command_path_prefix.as_str()
    }

    /// Resolves the descriptor addressed by a request path.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotFound`] when the path lacks the configured
    /// prefix or names no registered command.
    pub fn resolve(&self, path: &str) -> Result<&CommandDescriptor, DispatchError> {
        let Some(command) = path.strip_prefix(self.command_path_prefix.as_str()) else {
            return Err(DispatchError::not_found(path));
        };
        self.registry
            .lookup(command)
            .map_err(|_| DispatchError::not_found(command))
    }
}

impl<E> Dispatcher<E>
where
    E: Executor,
{
    /// Dispatches `request` and writes the JSON body to `writer`.
    ///
    /// The body is fully encoded before anything is written, so a failure in
    /// any stage leaves `writer` untouched.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that failed.
    pub fn execute_command<W: Write>(
        &self,
        request: &CommandRequest,
        caller: CallerId,
        writer: &mut W,
    ) -> Result<(), DispatchError> {
        let body = self.dispatch(request, caller)?;
        writer
            .write_all(&body)
            .and_then(|()| writer.flush())
            .map_err(|error| report(DispatchError::from(error)))
    }

    /// Dispatches `request` and returns the encoded response body.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that failed.
    pub fn dispatch(
        &self,
        request: &CommandRequest,
        caller: CallerId,
    ) -> Result<Vec<u8>, DispatchError> {
        self.run(request, caller).map_err(report)
    }

    fn run(&self, request: &CommandRequest, caller: CallerId) -> Result<Vec<u8>, DispatchError> {
        let descriptor = self.resolve(request.path())?;
        debug!(
            target: DISPATCH_TARGET,
            stage = DispatchStage::Resolve.as_str(),
            command = descriptor.name(),
            procedure = descriptor.procedure(),
            "resolved command"
        );

        let form = extract_parameters(descriptor, request)?;

        let arguments = self.binder.bind(descriptor, form)?.with_caller(caller);
        debug!(
            target: DISPATCH_TARGET,
            stage = DispatchStage::Bind.as_str(),
            command = descriptor.name(),
            arguments = arguments.len(),
            "bound arguments"
        );

        let cursor = self
            .executor
            .execute(descriptor.procedure(), &arguments)
            .map_err(|source| DispatchError::execution(descriptor.procedure(), source))?;
        debug!(
            target: DISPATCH_TARGET,
            stage = DispatchStage::Execute.as_str(),
            command = descriptor.name(),
            "procedure executed"
        );

        let body = serialize_rows(cursor)?;
        debug!(
            target: DISPATCH_TARGET,
            stage = DispatchStage::Serialize.as_str(),
            command = descriptor.name(),
            bytes = body.len(),
            "result serialized"
        );
        Ok(body)
    }
}

fn report(error: DispatchError) -> DispatchError {
    warn!(
        target: DISPATCH_TARGET,
        stage = error.stage().as_str(),
        %error,
        "dispatch failed"
    );
    error
}

/// Selects the request parameters for the descriptor's calling method.
fn extract_parameters<'r>(
    descriptor: &CommandDescriptor,
    request: &'r CommandRequest,
) -> Result<&'r FormParameters, DispatchError> {
    match descriptor.call_method() {
        CallMethod::Get | CallMethod::Post => Ok(request.form()),
        CallMethod::Ormless => Err(DispatchError::UnsupportedMethod {
            command: descriptor.name().to_owned(),
            method: CallMethod::Ormless.as_str().to_owned(),
        }),
        CallMethod::Unrecognised(method) => Err(DispatchError::UnknownMethod {
            command: descriptor.name().to_owned(),
            method: method.clone(),
        }),
    }
}
