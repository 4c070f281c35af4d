//! Positioned procedure arguments.
//!
//! Position 0 always carries the caller identity under
//! [`CALLER_IDENTITY_ARGUMENT`]; it is filled by dispatch and never from
//! request input. Positions 1..=N follow the descriptor's parameter order.

use std::fmt;

use crate::value::Value;

/// Argument name reserved for the caller identity. Descriptors may not
/// declare a parameter with this name.
pub const CALLER_IDENTITY_ARGUMENT: &str = "caller_id";

/// Externally authenticated identifier of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallerId(i64);

impl CallerId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for CallerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A named, typed value at a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArgument {
    position: usize,
    name: String,
    value: Value,
}

impl BoundArgument {
    /// Position in the argument list.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Argument name passed to the executor.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Bound value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Ordered argument list for one procedure call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArguments {
    caller: Option<BoundArgument>,
    parameters: Vec<BoundArgument>,
}

impl BoundArguments {
    /// Creates an empty list with position 0 unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the next parameter argument, numbered from position 1.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let position = self.parameters.len() + 1;
        self.parameters.push(BoundArgument {
            position,
            name: name.into(),
            value: value.into(),
        });
    }

    /// Fills (or overwrites) position 0 with the caller identity.
    pub fn set_caller(&mut self, caller: CallerId) {
        self.caller = Some(BoundArgument {
            position: 0,
            name: CALLER_IDENTITY_ARGUMENT.to_owned(),
            value: Value::Int(caller.get()),
        });
    }

    /// Builder-style variant of [`BoundArguments::set_caller`].
    #[must_use]
    pub fn with_caller(mut self, caller: CallerId) -> Self {
        self.set_caller(caller);
        self
    }

    /// Caller identity, if position 0 has been filled.
    #[must_use]
    pub fn caller(&self) -> Option<CallerId> {
        self.caller
            .as_ref()
            .and_then(|argument| argument.value.as_i64())
            .map(CallerId::new)
    }

    /// Parameter arguments at positions 1..=N.
    #[must_use]
    pub fn parameters(&self) -> &[BoundArgument] {
        &self.parameters
    }

    /// Looks up a bound argument by name, including the caller slot.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.iter()
            .find(|argument| argument.name == name)
            .map(BoundArgument::value)
    }

    /// Iterates over every argument in position order, caller first.
    pub fn iter(&self) -> impl Iterator<Item = &BoundArgument> {
        self.caller.iter().chain(self.parameters.iter())
    }

    /// Number of bound arguments, including the caller slot when set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len() + usize::from(self.caller.is_some())
    }

    /// Returns true when nothing has been bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
