//! User registration through the reserved registration command.
//!
//! Registration does not arrive as a request. The host calls
//! [`Dispatcher::register_user`] directly with the user's profile and the
//! procedure returns the new identity in the first column of its first row.

use tracing::{debug, warn};

use crate::arguments::{BoundArguments, CallerId};
use crate::executor::Executor;
use crate::serializer::SerializationError;

use super::dispatcher::{DISPATCH_TARGET, Dispatcher};
use super::errors::{DispatchError, DispatchStage};

/// Command name reserved for user registration.
pub const USER_REGISTRATION_COMMAND: &str = "#USER_REGISTER#";

/// Profile of a user being registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserData {
    /// Identity assigned by storage; set by a successful registration.
    pub user_id: Option<CallerId>,
    pub name: String,
    pub email: String,
    /// Identifier issued by the external identity provider.
    pub ext_id: String,
    pub oauth_service_name: String,
}

impl UserData {
    /// Creates an unregistered profile.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        ext_id: impl Into<String>,
        oauth_service_name: impl Into<String>,
    ) -> Self {
        Self {
            user_id: None,
            name: name.into(),
            email: email.into(),
            ext_id: ext_id.into(),
            oauth_service_name: oauth_service_name.into(),
        }
    }

    fn arguments(&self) -> BoundArguments {
        let mut arguments = BoundArguments::new();
        arguments.push("user_name", self.name.as_str());
        arguments.push("user_email", self.email.as_str());
        arguments.push("ext_id", self.ext_id.as_str());
        arguments.push("oauth_service_name", self.oauth_service_name.as_str());
        arguments
    }
}

impl<E> Dispatcher<E>
where
    E: Executor,
{
    /// Registers `user` and stores the assigned identity in `user.user_id`.
    ///
    /// `user` is left untouched when registration fails.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotFound`] when no registration descriptor is
    /// loaded, [`DispatchError::Execution`] when the procedure fails,
    /// [`DispatchError::EmptyResult`] when it returns no row, and
    /// [`DispatchError::Serialization`] when the identity is not an integer.
    pub fn register_user(&self, user: &mut UserData) -> Result<CallerId, DispatchError> {
        let result = self.run_registration(user);
        match result {
            Ok(id) => {
                user.user_id = Some(id);
                debug!(
                    target: DISPATCH_TARGET,
                    stage = DispatchStage::Respond.as_str(),
                    user_id = id.get(),
                    "user registered"
                );
                Ok(id)
            }
            Err(error) => {
                warn!(
                    target: DISPATCH_TARGET,
                    stage = error.stage().as_str(),
                    %error,
                    "user registration failed"
                );
                Err(error)
            }
        }
    }

    fn run_registration(&self, user: &UserData) -> Result<CallerId, DispatchError> {
        let descriptor = self
            .registry()
            .lookup(USER_REGISTRATION_COMMAND)
            .map_err(|_| DispatchError::not_found(USER_REGISTRATION_COMMAND))?;

        let mut cursor = self
            .executor()
            .execute(descriptor.procedure(), &user.arguments())
            .map_err(|source| DispatchError::execution(descriptor.procedure(), source))?;

        let row = match cursor.next_row() {
            None => {
                return Err(DispatchError::EmptyResult {
                    command: USER_REGISTRATION_COMMAND.to_owned(),
                });
            }
            Some(Err(source)) => {
                return Err(SerializationError::RowDecode { row: 0, source }.into());
            }
            Some(Ok(row)) => row,
        };
        drop(cursor);

        let Some((column, value)) = row.first() else {
            return Err(DispatchError::EmptyResult {
                command: USER_REGISTRATION_COMMAND.to_owned(),
            });
        };
        value.as_i64().map(CallerId::new).ok_or_else(|| {
            SerializationError::UnexpectedValue {
                column: column.to_owned(),
                expected: "int",
                found: value.kind_name(),
            }
            .into()
        })
    }
}
