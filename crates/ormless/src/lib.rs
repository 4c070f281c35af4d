//! Descriptor-driven gateway from HTTP-style command requests to stored
//! procedures.
//!
//! A deployment describes its commands in a JSON descriptor table: the command
//! name, the stored procedure behind it, the calling method, and an ordered
//! list of typed parameters. At startup the table is loaded and validated into
//! an immutable [`Registry`]. Each request then runs through the
//! [`Dispatcher`]: the command name is taken from the path after the
//! configured prefix, form parameters are validated and coerced against the
//! descriptor by the [`ParameterBinder`], the caller identity is prepended as
//! the first argument, and the procedure runs through an [`Executor`]. Result
//! rows are encoded as a JSON array of objects, or `{}` when there are none.
//!
//! Storage access stays behind the [`Executor`] and [`RowCursor`] traits so
//! hosts can plug in any driver. [`bootstrap_with`] wires configuration,
//! telemetry, and the registry together, emitting lifecycle events through a
//! [`HealthReporter`].

mod arguments;
mod binder;
mod bootstrap;
mod dispatch;
mod executor;
mod form;
mod health;
mod registry;
mod serializer;
mod telemetry;
mod value;

pub use arguments::{BoundArgument, BoundArguments, CALLER_IDENTITY_ARGUMENT, CallerId};
pub use binder::{BindError, ParameterBinder};
pub use bootstrap::{BootstrapError, ConfigLoader, Service, SystemConfigLoader, bootstrap_with};
pub use dispatch::{
    CommandRequest, DispatchError, DispatchStage, Dispatcher, USER_REGISTRATION_COMMAND, UserData,
};
pub use executor::{ExecutionError, Executor, RowCursor, RowDecodeError, RowSet};
pub use form::FormParameters;
pub use health::{HealthReporter, StructuredHealthReporter};
pub use registry::{
    CallMethod, CommandDescriptor, DescriptorRecord, DescriptorTable, ParameterDescriptor,
    ParameterKind, ParameterRecord, Registry, RegistryError,
};
pub use serializer::{EMPTY_RESULT_BODY, SerializationError, encode_rows, serialize_rows};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use value::{Row, Value};

#[cfg(test)]
mod tests;
