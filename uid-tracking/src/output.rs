// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution of the file unique IDs are written to.
//!
//! The output file is `<output dir>/<file name>`. The file name is
//! [`DEFAULT_FILE_NAME`] unless [`OUTPUT_FILE_KEY`] is set. The output
//! directory is chosen in this order:
//!
//! 1. The value of [`OUTPUT_DIR_KEY`], relative to the working directory, if
//!    it is set and not blank.
//! 2. `target` if the working directory contains a `pom.xml` (Maven).
//! 3. `build` if the working directory directly contains a file ending in
//!    `.gradle` or `.gradle.kts` (Gradle).
//! 4. The working directory itself.

use crate::{
    config::{ConfigurationParameters, OUTPUT_DIR_KEY, OUTPUT_FILE_KEY},
    errors::ResolveOutputError,
};
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use tracing::debug;

/// The default name of the output file.
pub const DEFAULT_FILE_NAME: &str = "unique-test-ids.txt";

static MAVEN_BUILD_FILE: &str = "pom.xml";
static MAVEN_OUTPUT_DIR: &str = "target";
static GRADLE_BUILD_FILE_EXTENSIONS: &[&str] = &[".gradle", ".gradle.kts"];
static GRADLE_OUTPUT_DIR: &str = "build";

/// How the output directory was selected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputDirKind {
    /// Set through [`OUTPUT_DIR_KEY`].
    Custom,

    /// `target`, because the working directory contains a `pom.xml`.
    Maven,

    /// `build`, because the working directory contains a Gradle build file.
    Gradle,

    /// The working directory, because no other rule applied.
    WorkingDir,
}

impl fmt::Display for OutputDirKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom => write!(f, "custom"),
            Self::Maven => write!(f, "maven"),
            Self::Gradle => write!(f, "gradle"),
            Self::WorkingDir => write!(f, "working directory"),
        }
    }
}

/// An output directory selected for a working directory and configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputDir {
    /// The selected directory. It may not exist yet.
    pub path: Utf8PathBuf,

    /// The rule that selected the directory.
    pub kind: OutputDirKind,
}

/// Selects the output directory without creating it.
pub fn select_output_dir(
    cwd: &Utf8Path,
    config: &dyn ConfigurationParameters,
) -> Result<OutputDir, ResolveOutputError> {
    if let Some(custom) = config.get(OUTPUT_DIR_KEY).filter(|dir| !is_blank(dir)) {
        return Ok(OutputDir {
            path: cwd.join(custom),
            kind: OutputDirKind::Custom,
        });
    }

    let (path, kind) = if cwd.join(MAVEN_BUILD_FILE).exists() {
        (cwd.join(MAVEN_OUTPUT_DIR), OutputDirKind::Maven)
    } else if contains_files_with_extensions(cwd, GRADLE_BUILD_FILE_EXTENSIONS)? {
        (cwd.join(GRADLE_OUTPUT_DIR), OutputDirKind::Gradle)
    } else {
        (cwd.to_owned(), OutputDirKind::WorkingDir)
    };
    Ok(OutputDir { path, kind })
}

/// Returns the output file name from configuration, or the default.
pub fn output_file_name(config: &dyn ConfigurationParameters) -> String {
    config
        .get(OUTPUT_FILE_KEY)
        .filter(|name| !is_blank(name))
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_owned())
}

/// Resolves the output file, creating its directory if necessary.
///
/// The returned file itself is not created.
pub fn resolve_output_file(
    cwd: &Utf8Path,
    config: &dyn ConfigurationParameters,
) -> Result<Utf8PathBuf, ResolveOutputError> {
    let file_name = output_file_name(config);
    let output_dir = select_output_dir(cwd, config)?;
    debug!(
        "selected {} output directory {}",
        output_dir.kind, output_dir.path
    );

    if !output_dir.path.exists() {
        std::fs::create_dir_all(&output_dir.path).map_err(|error| {
            ResolveOutputError::CreateDir {
                dir: output_dir.path.clone(),
                error,
            }
        })?;
    }

    Ok(output_dir.path.join(file_name))
}

/// Returns the current working directory as a UTF-8 path.
pub fn current_dir() -> Result<Utf8PathBuf, ResolveOutputError> {
    let cwd = std::env::current_dir().map_err(ResolveOutputError::CurrentDir)?;
    Utf8PathBuf::try_from(cwd)
        .map_err(|error| ResolveOutputError::NonUtf8CurrentDir(error.into_path_buf()))
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

// Only looks at regular files directly inside `dir`.
fn contains_files_with_extensions(
    dir: &Utf8Path,
    extensions: &[&str],
) -> Result<bool, ResolveOutputError> {
    let read_dir_error = |error| ResolveOutputError::ReadDir {
        dir: dir.to_owned(),
        error,
    };

    for entry in dir.read_dir_utf8().map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        if !entry.file_type().map_err(read_dir_error)?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if extensions.iter().any(|ext| name.ends_with(ext)) {
            return Ok(true);
        }
    }

    Ok(false)
}
