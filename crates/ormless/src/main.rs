//! Descriptor linter for deployments.
//!
//! Loads configuration, installs telemetry, and validates the descriptor
//! table exactly as a gateway host would at startup, then logs the commands
//! it found. Exits non-zero when any step fails.

use std::process::ExitCode;
use std::sync::Arc;

use ormless::{
    BoundArguments, ExecutionError, Executor, RowCursor, StructuredHealthReporter,
    SystemConfigLoader, bootstrap_with,
};

const LINT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::lint");

/// Executor used while linting; no procedure is ever run.
struct DetachedExecutor;

impl Executor for DetachedExecutor {
    fn execute(
        &self,
        procedure: &str,
        _arguments: &BoundArguments,
    ) -> Result<Box<dyn RowCursor>, ExecutionError> {
        Err(ExecutionError::new(format!(
            "no storage is attached; cannot run procedure '{procedure}'"
        )))
    }
}

fn main() -> ExitCode {
    let reporter = Arc::new(StructuredHealthReporter::new());
    match bootstrap_with(&SystemConfigLoader, reporter, DetachedExecutor) {
        Ok(service) => {
            for descriptor in service.dispatcher().registry().iter() {
                tracing::info!(
                    target: LINT_TARGET,
                    command = descriptor.name(),
                    procedure = descriptor.procedure(),
                    call_method = %descriptor.call_method(),
                    parameters = descriptor.parameters().len(),
                    "command descriptor"
                );
            }
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}
