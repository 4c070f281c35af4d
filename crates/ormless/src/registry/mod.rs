//! Command descriptor registry.
//!
//! Descriptors are read once at startup from a JSON array of records:
//!
//! ```json
//! [{"cmd_name":"entity.category_list","db_proc_name":"Entity.CategoryList",
//!   "call_method":"GET","parameters":[{"name":"p","type":"int","default":"0"}]}]
//! ```
//!
//! Loading happens in two steps. [`DescriptorTable`] holds the records exactly
//! as read; [`DescriptorTable::validate`] checks every declared type against
//! the supported set and produces the immutable [`Registry`] that dispatch
//! shares across requests. Both steps fail fast.

mod descriptor;
mod errors;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::{BufReader, Read};
use std::str::FromStr;

use camino::Utf8Path;
use tracing::debug;

use crate::arguments::CALLER_IDENTITY_ARGUMENT;

pub use self::descriptor::{
    CallMethod, CommandDescriptor, DescriptorRecord, ParameterDescriptor, ParameterKind,
    ParameterRecord,
};
pub use self::errors::RegistryError;

/// Tracing target for registry operations.
const REGISTRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::registry");

/// Descriptor records as loaded, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorTable {
    records: Vec<DescriptorRecord>,
}

impl DescriptorTable {
    /// Wraps already-parsed records.
    #[must_use]
    pub fn new(records: Vec<DescriptorRecord>) -> Self {
        Self { records }
    }

    /// Loads descriptor records from a file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Read`] if the file cannot be opened and
    /// [`RegistryError::Malformed`] if its content is not a descriptor list.
    pub fn load_path(path: &Utf8Path) -> Result<Self, RegistryError> {
        let file = File::open(path).map_err(|source| RegistryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_reader(BufReader::new(file))
    }

    /// Loads descriptor records from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Malformed`] if reading or decoding fails.
    pub fn load_reader<R: Read>(reader: R) -> Result<Self, RegistryError> {
        let records = serde_json::from_reader(reader)
            .map_err(|source| RegistryError::Malformed { source })?;
        Ok(Self { records })
    }

    /// Loaded records in source order.
    #[must_use]
    pub fn records(&self) -> &[DescriptorRecord] {
        &self.records
    }

    /// Checks every record and builds the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnsupportedType`] naming the first offending
    /// command, parameter, and type; [`RegistryError::DuplicateCommand`] when
    /// a command name repeats; [`RegistryError::ReservedParameter`] when a
    /// parameter would shadow the caller identity argument.
    pub fn validate(self) -> Result<Registry, RegistryError> {
        let mut descriptors = Vec::with_capacity(self.records.len());
        let mut index = HashMap::with_capacity(self.records.len());

        for record in self.records {
            let descriptor = validate_record(record)?;
            match index.entry(descriptor.name().to_owned()) {
                Entry::Occupied(entry) => {
                    return Err(RegistryError::DuplicateCommand {
                        command: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(descriptors.len());
                }
            }
            descriptors.push(descriptor);
        }

        debug!(
            target: REGISTRY_TARGET,
            commands = descriptors.len(),
            "descriptor table validated"
        );
        Ok(Registry { descriptors, index })
    }
}

impl FromStr for DescriptorTable {
    type Err = RegistryError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::load_reader(source.as_bytes())
    }
}

fn validate_record(record: DescriptorRecord) -> Result<CommandDescriptor, RegistryError> {
    let DescriptorRecord {
        command_name,
        procedure_name,
        call_method,
        parameters,
    } = record;

    let mut validated = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        let Some(kind) = ParameterKind::parse(&parameter.type_name) else {
            return Err(RegistryError::UnsupportedType {
                command: command_name,
                parameter: parameter.name,
                type_name: parameter.type_name,
            });
        };
        if parameter.name == CALLER_IDENTITY_ARGUMENT {
            return Err(RegistryError::ReservedParameter {
                command: command_name,
                parameter: parameter.name,
            });
        }
        validated.push(ParameterDescriptor::new(
            parameter.name,
            kind,
            parameter.default,
        ));
    }

    let call_method = match call_method.parse::<CallMethod>() {
        Ok(method) => method,
        Err(never) => match never {},
    };

    Ok(CommandDescriptor::new(
        command_name,
        procedure_name,
        call_method,
        validated,
    ))
}

/// Immutable, validated descriptor table shared by every dispatch.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    descriptors: Vec<CommandDescriptor>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Loads and validates the descriptor file in one step.
    ///
    /// # Errors
    ///
    /// Propagates load and validation failures from [`DescriptorTable`].
    pub fn load(path: &Utf8Path) -> Result<Self, RegistryError> {
        DescriptorTable::load_path(path)?.validate()
    }

    /// Finds the descriptor for `command`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] naming the missing command.
    pub fn lookup(&self, command: &str) -> Result<&CommandDescriptor, RegistryError> {
        self.index
            .get(command)
            .and_then(|position| self.descriptors.get(*position))
            .ok_or_else(|| RegistryError::not_found(command))
    }

    /// Descriptors in source order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.descriptors.iter()
    }

    /// Number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true when no commands are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
