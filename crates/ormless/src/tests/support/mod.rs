//! Test harness utilities for the bootstrap and dispatch behavioural suites.

mod config_loader;
mod executor;
mod reporter;
mod world;

pub use config_loader::{FailingConfigLoader, REFERENCE_CATALOGUE, TestConfigLoader};
pub use executor::RecordingExecutor;
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use world::{TestWorld, world};
