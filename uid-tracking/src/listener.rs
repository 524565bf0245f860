// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The lifecycle hooks a test host invokes on registered listeners.

use crate::{
    config::ConfigurationParameters,
    identifier::{TestExecutionResult, TestIdentifier},
};

/// Observes the lifecycle of a test run.
///
/// The host calls [`run_started`](Self::run_started) once, then
/// [`case_finished`](Self::case_finished) for every test and container that
/// finishes, then [`run_finished`](Self::run_finished) once. Calls are made
/// sequentially; listeners don't need to synchronize internally.
///
/// Hooks don't return errors: a listener must not be able to alter or abort the
/// host's run. All methods default to doing nothing.
pub trait TestExecutionListener {
    /// Called before any test in the run executes.
    fn run_started(&mut self, _config: &dyn ConfigurationParameters) {}

    /// Called when a test or container finishes, whatever its outcome.
    fn case_finished(&mut self, _identifier: &TestIdentifier, _result: &TestExecutionResult) {}

    /// Called after every test in the run has finished.
    fn run_finished(&mut self, _config: &dyn ConfigurationParameters) {}
}

impl<L: TestExecutionListener + ?Sized> TestExecutionListener for &mut L {
    fn run_started(&mut self, config: &dyn ConfigurationParameters) {
        (**self).run_started(config)
    }

    fn case_finished(&mut self, identifier: &TestIdentifier, result: &TestExecutionResult) {
        (**self).case_finished(identifier, result)
    }

    fn run_finished(&mut self, config: &dyn ConfigurationParameters) {
        (**self).run_finished(config)
    }
}

impl<L: TestExecutionListener + ?Sized> TestExecutionListener for Box<L> {
    fn run_started(&mut self, config: &dyn ConfigurationParameters) {
        (**self).run_started(config)
    }

    fn case_finished(&mut self, identifier: &TestIdentifier, result: &TestExecutionResult) {
        (**self).case_finished(identifier, result)
    }

    fn run_finished(&mut self, config: &dyn ConfigurationParameters) {
        (**self).run_finished(config)
    }
}

/// A set of listeners registered with a host.
///
/// Every hook is forwarded to each listener in registration order.
#[derive(Default)]
pub struct ListenerSet<'a> {
    listeners: Vec<Box<dyn TestExecutionListener + 'a>>,
}

impl<'a> ListenerSet<'a> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener.
    pub fn register(&mut self, listener: impl TestExecutionListener + 'a) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Returns the number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl TestExecutionListener for ListenerSet<'_> {
    fn run_started(&mut self, config: &dyn ConfigurationParameters) {
        for listener in &mut self.listeners {
            listener.run_started(config);
        }
    }

    fn case_finished(&mut self, identifier: &TestIdentifier, result: &TestExecutionResult) {
        for listener in &mut self.listeners {
            listener.case_finished(identifier, result);
        }
    }

    fn run_finished(&mut self, config: &dyn ConfigurationParameters) {
        for listener in &mut self.listeners {
            listener.run_finished(config);
        }
    }
}
