// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drive listeners from libtest's JSON output.
//!
//! Test binaries using the standard libtest harness print one JSON object per
//! line for each event when run with `-Z unstable-options --format json` (or
//! through a runner that replicates the format). The events this module
//! consumes are:
//!
//! * `{ "type": "suite", "event": "started", "test_count": <u32> }`, the start of
//!   a test binary's run
//! * `{ "type": "test", "event": "ok" | "failed" | "ignored", "name": "<name>" }`,
//!   a finished test, with optional `stdout` and `message` fields
//!
//! Everything else (`started` and `timeout` test events, suite results,
//! benchmarks) is accepted and ignored. Lines that aren't libtest events, such
//! as build output or JSON logged by a test run with `--nocapture`, are
//! skipped.
//!
//! A whole stream is treated as a single run, even if it contains the output of
//! several test binaries.

use crate::{
    config::ConfigurationParameters,
    errors::LibtestParseError,
    identifier::{TestExecutionResult, TestIdentifier},
    listener::TestExecutionListener,
};
use serde::Deserialize;
use std::io::BufRead;
use tracing::{debug, trace};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum LibtestEvent {
    Suite {
        event: SuiteEvent,
    },
    Test {
        event: TestEvent,
        name: String,
        #[serde(default)]
        stdout: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
    #[serde(other)]
    Other,
}

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SuiteEvent {
    Started,
    #[serde(other)]
    Finished,
}

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TestEvent {
    Ok,
    Failed,
    Ignored,
    #[serde(other)]
    Progress,
}

/// Counts of what a [`LibtestEventReader`] dispatched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LibtestReadSummary {
    /// The number of suites (test binaries) that started.
    pub suites_started: usize,

    /// The number of tests that finished.
    pub tests_finished: usize,

    /// The number of lines skipped because they were not libtest events.
    pub lines_skipped: usize,
}

/// Reads libtest JSON events and forwards them to a [`TestExecutionListener`].
#[derive(Clone, Copy)]
pub struct LibtestEventReader<'a> {
    config: &'a dyn ConfigurationParameters,
    binary_id: Option<&'a str>,
}

impl<'a> LibtestEventReader<'a> {
    /// Creates a new reader which hands `config` to the run lifecycle hooks.
    pub fn new(config: &'a dyn ConfigurationParameters) -> Self {
        Self {
            config,
            binary_id: None,
        }
    }

    /// Qualifies test names with the given binary ID.
    ///
    /// Test names are only unique within a binary, so this should be set when
    /// IDs from several binaries end up in the same file.
    pub fn with_binary_id(mut self, binary_id: &'a str) -> Self {
        self.binary_id = Some(binary_id);
        self
    }

    /// Returns the unique ID for a test name.
    pub fn unique_id(&self, test_name: &str) -> String {
        match self.binary_id {
            Some(binary_id) => format!("[binary:{binary_id}]/[test:{test_name}]"),
            None => format!("[test:{test_name}]"),
        }
    }

    /// Reads events from `reader` until end of input, dispatching them to
    /// `listener`.
    ///
    /// `run_started` is called on the first suite start (or the first finished
    /// test, if no suite start precedes it), and `run_finished` once input ends.
    /// If reading fails partway, `run_finished` is still called for a started
    /// run before the error is returned.
    pub fn read_events<R, L>(
        &self,
        reader: R,
        listener: &mut L,
    ) -> Result<LibtestReadSummary, LibtestParseError>
    where
        R: BufRead,
        L: TestExecutionListener + ?Sized,
    {
        let mut state = ReadState {
            started: false,
            summary: LibtestReadSummary::default(),
        };

        let res = self.read_inner(reader, listener, &mut state);
        if state.started {
            listener.run_finished(self.config);
        }
        debug!(
            "read libtest events: {} suites started, {} tests finished, {} lines skipped",
            state.summary.suites_started, state.summary.tests_finished, state.summary.lines_skipped,
        );

        res.map(|()| state.summary)
    }

    fn read_inner<R, L>(
        &self,
        reader: R,
        listener: &mut L,
        state: &mut ReadState,
    ) -> Result<(), LibtestParseError>
    where
        R: BufRead,
        L: TestExecutionListener + ?Sized,
    {
        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|error| LibtestParseError::Read {
                line: line_number,
                error,
            })?;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if !trimmed.starts_with('{') {
                trace!("skipping non-JSON line {line_number}: {trimmed}");
                state.summary.lines_skipped += 1;
                continue;
            }

            match serde_json::from_str::<LibtestEvent>(trimmed) {
                Ok(event) => self.dispatch(event, listener, state),
                Err(error) => {
                    debug!("skipping line {line_number}, not a libtest event: {error}");
                    state.summary.lines_skipped += 1;
                }
            }
        }

        Ok(())
    }

    fn dispatch<L>(&self, event: LibtestEvent, listener: &mut L, state: &mut ReadState)
    where
        L: TestExecutionListener + ?Sized,
    {
        match event {
            LibtestEvent::Suite {
                event: SuiteEvent::Started,
            } => {
                state.summary.suites_started += 1;
                state.ensure_started(listener, self.config);
            }
            LibtestEvent::Suite {
                event: SuiteEvent::Finished,
            } => {}
            LibtestEvent::Test {
                event,
                name,
                stdout,
                message,
            } => {
                let result = match event {
                    TestEvent::Ok => TestExecutionResult::Successful,
                    TestEvent::Failed => TestExecutionResult::Failed {
                        message: message.or(stdout),
                    },
                    TestEvent::Ignored => TestExecutionResult::Skipped { reason: message },
                    TestEvent::Progress => return,
                };

                state.ensure_started(listener, self.config);
                state.summary.tests_finished += 1;
                listener.case_finished(&TestIdentifier::test(self.unique_id(&name)), &result);
            }
            LibtestEvent::Other => {}
        }
    }
}

struct ReadState {
    started: bool,
    summary: LibtestReadSummary,
}

impl ReadState {
    fn ensure_started<L>(&mut self, listener: &mut L, config: &dyn ConfigurationParameters)
    where
        L: TestExecutionListener + ?Sized,
    {
        if !self.started {
            self.started = true;
            listener.run_started(config);
        }
    }
}
