//! Command dispatch.
//!
//! A request path names a command after the configured prefix. The dispatcher
//! resolves the descriptor, checks its calling method, binds the request's
//! form parameters, prepends the caller identity, runs the procedure through
//! the [`crate::Executor`], and encodes the result as JSON. Each stage either
//! hands its output to the next or stops the dispatch with a
//! [`DispatchError`].

mod dispatcher;
mod errors;
mod registration;
mod request;

pub use self::dispatcher::Dispatcher;
pub use self::errors::{DispatchError, DispatchStage};
pub use self::registration::{USER_REGISTRATION_COMMAND, UserData};
pub use self::request::CommandRequest;
