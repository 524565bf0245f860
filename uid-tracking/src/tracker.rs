// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A listener that records the unique IDs of executed tests.

use crate::{
    config::{ConfigurationParameters, ENABLED_KEY},
    errors::{DisplayErrorChain, WriteIdsError},
    identifier::{TestExecutionResult, TestIdentifier},
    listener::TestExecutionListener,
    output::{current_dir, resolve_output_file},
};
use camino::{Utf8Path, Utf8PathBuf};
use std::{
    fs::File,
    io::{BufWriter, Write},
};
use tracing::{debug, error, trace};

/// Records the unique ID of every test that finishes during a run, and writes
/// them to a file once the run finishes.
///
/// Tracking is disabled unless [`ENABLED_KEY`] is `true` when the run starts.
/// IDs are recorded whatever the test's outcome, in the order tests finish.
/// Containers are not recorded.
///
/// The output file is resolved when the run finishes; see
/// [`crate::output`] for how its location is chosen. Failing to write the file
/// is logged and otherwise ignored, so that the run itself is unaffected.
#[derive(Clone, Debug, Default)]
pub struct UniqueIdTracker {
    enabled: bool,
    unique_ids: Vec<String>,
    working_dir: Option<Utf8PathBuf>,
}

impl UniqueIdTracker {
    /// Creates a new tracker that resolves output relative to the process's
    /// current working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new tracker that resolves output relative to `working_dir`.
    pub fn with_working_dir(working_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            working_dir: Some(working_dir.into()),
            ..Self::default()
        }
    }

    /// Returns true if tracking is enabled for the current run.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the unique IDs recorded so far in the current run.
    pub fn unique_ids(&self) -> &[String] {
        &self.unique_ids
    }

    /// Resolves the output file and writes the recorded unique IDs to it, one
    /// per line.
    ///
    /// Any existing file is truncated. Returns the path written to.
    pub fn write_unique_ids(
        &self,
        config: &dyn ConfigurationParameters,
    ) -> Result<Utf8PathBuf, WriteIdsError> {
        let cwd = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => current_dir()?,
        };
        let output_file = resolve_output_file(&cwd, config)?;

        debug!(
            "writing {} unique IDs to output file {output_file}",
            self.unique_ids.len()
        );
        write_lines(&output_file, &self.unique_ids)?;

        Ok(output_file)
    }
}

impl TestExecutionListener for UniqueIdTracker {
    fn run_started(&mut self, config: &dyn ConfigurationParameters) {
        self.enabled = config.get_bool(ENABLED_KEY).unwrap_or(false);
        self.unique_ids.clear();
        trace!("unique ID tracking enabled: {}", self.enabled);
    }

    fn case_finished(&mut self, identifier: &TestIdentifier, _result: &TestExecutionResult) {
        if self.enabled && identifier.is_test() {
            self.unique_ids.push(identifier.unique_id().to_owned());
        }
    }

    fn run_finished(&mut self, config: &dyn ConfigurationParameters) {
        if !self.enabled {
            return;
        }

        if let Err(err) = self.write_unique_ids(config) {
            error!("{}", DisplayErrorChain::new(err));
        }

        self.unique_ids.clear();
    }
}

fn write_lines(file: &Utf8Path, lines: &[String]) -> Result<(), WriteIdsError> {
    let f = File::create(file).map_err(|error| WriteIdsError::Create {
        file: file.to_owned(),
        error,
    })?;
    let write_error = |error| WriteIdsError::Write {
        file: file.to_owned(),
        error,
    };

    // The handle is closed when the writer is dropped, on success or error.
    let mut writer = BufWriter::new(f);
    for line in lines {
        writeln!(writer, "{line}").map_err(write_error)?;
    }
    writer.flush().map_err(write_error)
}
