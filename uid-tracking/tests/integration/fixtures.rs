// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8Path;
use camino_tempfile::Utf8TempDir;
use color_eyre::eyre::{Result, WrapErr};
use std::sync::Once;
use uid_tracking::{
    config::{ENABLED_KEY, MapParameters},
    identifier::{TestExecutionResult, TestIdentifier},
    listener::TestExecutionListener,
};

static INIT: Once = Once::new();

pub(crate) fn test_init() {
    INIT.call_once(|| {
        // color-eyre may already be installed by another harness; that's fine.
        let _ = color_eyre::install();
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .init();
    });
}

/// A fresh working directory for a simulated project.
pub(crate) struct TempProject {
    dir: Utf8TempDir,
}

impl TempProject {
    pub(crate) fn new() -> Result<Self> {
        let dir = Utf8TempDir::with_prefix("uid-tracking-")
            .wrap_err("failed to create temporary directory")?;
        Ok(Self { dir })
    }

    pub(crate) fn root(&self) -> &Utf8Path {
        self.dir.path()
    }

    pub(crate) fn touch(&self, rel_path: &str) -> Result<()> {
        let path = self.root().join(rel_path);
        std::fs::write(&path, "").wrap_err_with(|| format!("failed to create {path}"))
    }

    pub(crate) fn read(&self, rel_path: &str) -> Result<String> {
        let path = self.root().join(rel_path);
        std::fs::read_to_string(&path).wrap_err_with(|| format!("failed to read {path}"))
    }
}

pub(crate) fn enabled() -> MapParameters {
    [(ENABLED_KEY, "true")].into_iter().collect()
}

/// Runs a full lifecycle on `listener`, finishing each case in order.
pub(crate) fn run(
    listener: &mut dyn TestExecutionListener,
    config: &MapParameters,
    cases: &[(TestIdentifier, TestExecutionResult)],
) {
    listener.run_started(config);
    for (identifier, result) in cases {
        listener.case_finished(identifier, result);
    }
    listener.run_finished(config);
}

pub(crate) fn failed(message: &str) -> TestExecutionResult {
    TestExecutionResult::Failed {
        message: Some(message.to_owned()),
    }
}
