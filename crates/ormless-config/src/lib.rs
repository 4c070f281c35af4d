//! Shared configuration for the ormless command gateway.
//!
//! Configuration is layered by [`ortho_config`]: built-in defaults, then an
//! optional configuration file, then `ORMLESS_*` environment variables, then
//! command-line flags. Later layers win. Any layer that fails to parse aborts
//! loading so a misconfigured gateway never starts serving requests.

mod defaults;
mod logging;
mod policy;

use std::ffi::OsString;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::{OrthoConfig, OrthoError};
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_COMMAND_PATH_PREFIX, DEFAULT_DESCRIPTOR_PATH, DEFAULT_LOG_FILTER,
    DEFAULT_PARAMETERS_COUNT_LIMIT, default_command_path_prefix, default_descriptor_path,
    default_log_filter, default_log_filter_string, default_log_format, default_multi_value_policy,
    default_parameters_count_limit,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use policy::{MultiValuePolicy, MultiValuePolicyParseError};

/// Resolved gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "ORMLESS")]
pub struct Config {
    /// `tracing` filter expression applied to the global subscriber.
    #[serde(default = "default_log_filter_string")]
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log lines.
    #[serde(default = "default_log_format")]
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Location of the JSON command descriptor table.
    #[serde(default = "default_descriptor_path")]
    #[ortho_config(default = default_descriptor_path())]
    pub descriptor_path: Utf8PathBuf,
    /// Prefix stripped from request paths to obtain the command name.
    #[serde(default = "default_command_path_prefix")]
    #[ortho_config(default = default_command_path_prefix())]
    pub command_path_prefix: String,
    /// Maximum number of distinct parameters accepted per request.
    #[serde(default = "default_parameters_count_limit")]
    #[ortho_config(default = default_parameters_count_limit())]
    pub parameters_count_limit: usize,
    /// Treatment of parameters supplied more than once.
    #[serde(default = "default_multi_value_policy")]
    #[ortho_config(default = default_multi_value_policy())]
    pub multi_value_policy: MultiValuePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            descriptor_path: default_descriptor_path(),
            command_path_prefix: default_command_path_prefix(),
            parameters_count_limit: default_parameters_count_limit(),
            multi_value_policy: default_multi_value_policy(),
        }
    }
}

impl Config {
    /// Loads configuration from the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns the aggregated loader error when any layer is malformed.
    pub fn load() -> Result<Self, Arc<OrthoError>> {
        <Self as OrthoConfig>::load()
    }

    /// Loads configuration from an explicit argument list.
    ///
    /// The first item is treated as the program name, matching
    /// [`std::env::args_os`].
    ///
    /// # Errors
    ///
    /// Returns the aggregated loader error when any layer is malformed.
    pub fn load_from_iter<I, T>(args: I) -> Result<Self, Arc<OrthoError>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as OrthoConfig>::load_from_iter(args)
    }

    /// Filter expression for the tracing subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Format used for log lines.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Path of the descriptor table.
    #[must_use]
    pub fn descriptor_path(&self) -> &Utf8Path {
        self.descriptor_path.as_path()
    }

    /// Prefix stripped from request paths.
    #[must_use]
    pub fn command_path_prefix(&self) -> &str {
        self.command_path_prefix.as_str()
    }

    /// Maximum number of distinct request parameters.
    #[must_use]
    pub fn parameters_count_limit(&self) -> usize {
        self.parameters_count_limit
    }

    /// Handling for repeated parameter keys.
    #[must_use]
    pub fn multi_value_policy(&self) -> MultiValuePolicy {
        self.multi_value_policy
    }
}
