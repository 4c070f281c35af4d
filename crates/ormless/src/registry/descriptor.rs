//! Command and parameter descriptors.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Raw descriptor record as it appears in the descriptor source.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DescriptorRecord {
    /// Public command name.
    #[serde(rename = "cmd_name")]
    pub command_name: String,
    /// Stored procedure invoked for the command.
    #[serde(rename = "db_proc_name")]
    pub procedure_name: String,
    /// Declared calling method.
    pub call_method: String,
    /// Declared parameters in positional order.
    #[serde(default)]
    pub parameters: Vec<ParameterRecord>,
}

/// Raw parameter record as it appears in the descriptor source.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ParameterRecord {
    /// Parameter name matched against request keys.
    pub name: String,
    /// Declared type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Default value in string form; empty means no default.
    #[serde(default)]
    pub default: String,
}

/// Closed set of parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// `bool`
    Bool,
    /// `int`: 64-bit signed.
    Int,
    /// `uint`: 64-bit unsigned.
    UInt,
    /// `float`: 64-bit IEEE-754.
    Float,
    /// `string`: passed through unchanged.
    String,
}

impl ParameterKind {
    /// Parses a declared type name. Matching is exact.
    #[must_use]
    pub fn parse(type_name: &str) -> Option<Self> {
        match type_name {
            "bool" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "uint" => Some(Self::UInt),
            "float" => Some(Self::Float),
            "string" => Some(Self::String),
            _ => None,
        }
    }

    /// Canonical type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Float => "float",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Declared calling method of a command.
///
/// `GET` and `POST` both read form parameters. `ORMLESS` marks commands that
/// are only invoked internally (user registration, for instance) and is
/// refused on the request path. Anything else is kept verbatim so dispatch can
/// report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `ORMLESS`
    Ormless,
    /// Any other declared value.
    Unrecognised(String),
}

impl CallMethod {
    /// Declared spelling of the method.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Ormless => "ORMLESS",
            Self::Unrecognised(other) => other.as_str(),
        }
    }
}

impl FromStr for CallMethod {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "ORMLESS" => Self::Ormless,
            other => Self::Unrecognised(other.to_owned()),
        })
    }
}

impl fmt::Display for CallMethod {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Validated parameter descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    name: String,
    kind: ParameterKind,
    default: Option<String>,
}

impl ParameterDescriptor {
    /// Builds a descriptor; an empty default is treated as absent.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ParameterKind, default: impl Into<String>) -> Self {
        let default = default.into();
        Self {
            name: name.into(),
            kind,
            default: (!default.is_empty()).then_some(default),
        }
    }

    /// Parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Declared type.
    #[must_use]
    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    /// Default value, if one was declared.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

/// Validated command descriptor. Immutable once the registry is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    name: String,
    procedure: String,
    call_method: CallMethod,
    parameters: Vec<ParameterDescriptor>,
}

impl CommandDescriptor {
    /// Builds a descriptor from validated parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        procedure: impl Into<String>,
        call_method: CallMethod,
        parameters: Vec<ParameterDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            procedure: procedure.into(),
            call_method,
            parameters,
        }
    }

    /// Public command name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Stored procedure backing the command.
    #[must_use]
    pub fn procedure(&self) -> &str {
        self.procedure.as_str()
    }

    /// Declared calling method.
    #[must_use]
    pub fn call_method(&self) -> &CallMethod {
        &self.call_method
    }

    /// Parameters in positional order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }
}
