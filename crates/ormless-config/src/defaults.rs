use camino::Utf8PathBuf;

use crate::logging::LogFormat;
use crate::policy::MultiValuePolicy;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default location of the command descriptor table.
pub const DEFAULT_DESCRIPTOR_PATH: &str = "commands.json";

/// Default prefix stripped from request paths to obtain the command name.
pub const DEFAULT_COMMAND_PATH_PREFIX: &str = "/cmd/";

/// Default ceiling on the number of distinct request parameters.
pub const DEFAULT_PARAMETERS_COUNT_LIMIT: usize = 16;

/// Default log filter expression used by the binaries.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Default descriptor table path.
pub fn default_descriptor_path() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_DESCRIPTOR_PATH)
}

/// Owned command path prefix used by serde.
pub fn default_command_path_prefix() -> String {
    DEFAULT_COMMAND_PATH_PREFIX.to_owned()
}

/// Default parameter ceiling.
pub fn default_parameters_count_limit() -> usize {
    DEFAULT_PARAMETERS_COUNT_LIMIT
}

/// Default handling for repeated form keys.
pub fn default_multi_value_policy() -> MultiValuePolicy {
    MultiValuePolicy::Reject
}
