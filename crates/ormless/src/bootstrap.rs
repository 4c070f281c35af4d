//! Gateway bootstrap orchestration.

use std::sync::Arc;

use ormless_config::Config;
use ortho_config::OrthoError;
use thiserror::Error;

use crate::dispatch::Dispatcher;
use crate::executor::Executor;
use crate::health::HealthReporter;
use crate::registry::{Registry, RegistryError};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the gateway configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The descriptor table could not be loaded or validated.
    #[error("failed to load command descriptors: {source}")]
    Descriptors {
        #[source]
        source: RegistryError,
    },
}

/// Result of a successful bootstrap invocation.
#[derive(Debug)]
pub struct Service<E> {
    config: Config,
    dispatcher: Arc<Dispatcher<E>>,
    telemetry: TelemetryHandle,
}

impl<E> Service<E> {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared dispatcher; clone the [`Arc`] to hand it to request workers.
    #[must_use]
    pub fn dispatcher(&self) -> &Arc<Dispatcher<E>> {
        &self.dispatcher
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }
}

/// Bootstraps the gateway using the supplied collaborators.
///
/// Configuration is loaded first, then telemetry is installed, then the
/// descriptor registry is read from [`Config::descriptor_path`] and validated.
/// Any failure is reported to `reporter` and returned.
///
/// # Errors
///
/// Returns the [`BootstrapError`] of the first step that failed.
pub fn bootstrap_with<E>(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
    executor: E,
) -> Result<Service<E>, BootstrapError>
where
    E: Executor,
{
    reporter.bootstrap_starting();

    let config = match loader.load() {
        Ok(config) => config,
        Err(source) => {
            let error = BootstrapError::Configuration { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let telemetry = match telemetry::initialise(&config) {
        Ok(handle) => handle,
        Err(source) => {
            let error = BootstrapError::Telemetry { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    let registry = match Registry::load(config.descriptor_path()) {
        Ok(registry) => Arc::new(registry),
        Err(source) => {
            let error = BootstrapError::Descriptors { source };
            reporter.bootstrap_failed(&error);
            return Err(error);
        }
    };

    reporter.bootstrap_succeeded(&config, registry.len());
    let dispatcher = Arc::new(Dispatcher::from_config(&config, registry, executor));

    Ok(Service {
        config,
        dispatcher,
        telemetry,
    })
}
