//! BDD test world: loader, reporter, executor, and the results of bootstrap,
//! dispatch, and registration for step functions to inspect.

use std::cell::RefCell;
use std::sync::Arc;

use crate::arguments::CallerId;
use crate::bootstrap::{BootstrapError, ConfigLoader, Service, bootstrap_with};
use crate::dispatch::{CommandRequest, DispatchError, UserData};

use super::config_loader::{FailingConfigLoader, TestConfigLoader};
use super::executor::RecordingExecutor;
use super::reporter::RecordingHealthReporter;

/// Scenario world shared across BDD steps.
pub struct TestWorld {
    loader: Box<dyn ConfigLoader>,
    pub reporter: Arc<RecordingHealthReporter>,
    pub executor: RecordingExecutor,
    service: Option<Service<RecordingExecutor>>,
    bootstrap_error: Option<BootstrapError>,
    response: Option<Result<Vec<u8>, DispatchError>>,
    pub user: UserData,
    registration: Option<Result<CallerId, DispatchError>>,
}

impl TestWorld {
    /// Builds a world serving the reference catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loader: Box::new(TestConfigLoader::new()),
            reporter: Arc::new(RecordingHealthReporter::default()),
            executor: RecordingExecutor::default(),
            service: None,
            bootstrap_error: None,
            response: None,
            user: UserData::new("Ada", "ada@example.com", "g-100", "google"),
            registration: None,
        }
    }

    /// Installs a loader that always fails.
    pub fn use_failing_loader(&mut self) {
        self.loader = Box::new(FailingConfigLoader);
        self.reset_results();
    }

    /// Installs a loader serving `descriptors`.
    pub fn use_descriptors(&mut self, descriptors: &str) {
        self.loader = Box::new(TestConfigLoader::with_descriptors(descriptors));
        self.reset_results();
    }

    /// Installs a loader whose descriptor file is absent.
    pub fn use_missing_descriptors(&mut self) {
        self.loader = Box::new(TestConfigLoader::missing_descriptors());
        self.reset_results();
    }

    /// Runs the bootstrap sequence once.
    pub fn bootstrap(&mut self) {
        if self.service.is_some() || self.bootstrap_error.is_some() {
            return;
        }

        let executor = self.executor.clone();
        match bootstrap_with(&*self.loader, self.reporter.clone(), executor) {
            Ok(service) => self.service = Some(service),
            Err(error) => self.bootstrap_error = Some(error),
        }
    }

    /// Dispatches a request target on behalf of `caller`.
    pub fn dispatch(&mut self, target: &str, caller: CallerId) {
        self.bootstrap();
        let service = self.service.as_ref().expect("bootstrap should succeed");
        let request = CommandRequest::parse(target);
        self.response = Some(service.dispatcher().dispatch(&request, caller));
    }

    /// Registers [`Self::user`].
    pub fn register(&mut self) {
        self.bootstrap();
        let service = self.service.as_ref().expect("bootstrap should succeed");
        self.registration = Some(service.dispatcher().register_user(&mut self.user));
    }

    /// Returns whether bootstrap produced an error.
    #[must_use]
    pub fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }

    /// Returns the bootstrapped service, if any.
    #[must_use]
    pub fn service(&self) -> Option<&Service<RecordingExecutor>> {
        self.service.as_ref()
    }

    /// Body of the last successful dispatch.
    #[must_use]
    pub fn body(&self) -> String {
        let body = self
            .response
            .as_ref()
            .expect("no dispatch has run")
            .as_ref()
            .expect("dispatch should succeed");
        String::from_utf8(body.clone()).expect("response body was not UTF-8")
    }

    /// Error of the last failed dispatch.
    #[must_use]
    pub fn dispatch_error(&self) -> &DispatchError {
        self.response
            .as_ref()
            .expect("no dispatch has run")
            .as_ref()
            .expect_err("dispatch should fail")
    }

    /// Outcome of the last registration.
    #[must_use]
    pub fn registration(&self) -> &Result<CallerId, DispatchError> {
        self.registration.as_ref().expect("no registration has run")
    }

    fn reset_results(&mut self) {
        self.service = None;
        self.bootstrap_error = None;
        self.response = None;
        self.registration = None;
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Default test world fixture.
#[must_use]
pub fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}
