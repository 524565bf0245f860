// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while tracking unique IDs.

use camino::Utf8PathBuf;
use std::{error, fmt};
use thiserror::Error;

/// An error that occurred while resolving the output file for unique IDs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolveOutputError {
    /// The current working directory could not be determined.
    #[error("failed to determine the current working directory")]
    CurrentDir(#[source] std::io::Error),

    /// The current working directory is not valid UTF-8.
    #[error("current working directory is not valid UTF-8: {}", .0.display())]
    NonUtf8CurrentDir(std::path::PathBuf),

    /// The working directory could not be scanned for build files.
    #[error("failed to read directory {dir}")]
    ReadDir {
        /// The directory being read.
        dir: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// The output directory could not be created.
    #[error("failed to create output directory {dir}")]
    CreateDir {
        /// The directory that failed to be created.
        dir: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },
}

/// An error that occurred while writing unique IDs to the output file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteIdsError {
    /// The output file could not be resolved.
    #[error("failed to resolve output file")]
    Resolve(#[from] ResolveOutputError),

    /// The output file could not be created.
    #[error("failed to create output file {file}")]
    Create {
        /// The file that failed to be created.
        file: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// Unique IDs could not be written to the output file.
    #[error("failed to write unique IDs to output file {file}")]
    Write {
        /// The file being written to.
        file: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },
}

/// An error that occurred while loading [`TomlParameters`](crate::config::TomlParameters).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TomlParametersError {
    /// The parameters file could not be read.
    #[error("failed to read parameters file {path}")]
    Read {
        /// The path that failed to be read.
        path: Utf8PathBuf,

        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// The parameters file is not valid TOML.
    #[error("failed to parse parameters file {path}")]
    Parse {
        /// The path that failed to be parsed.
        path: Utf8PathBuf,

        /// The underlying TOML error.
        #[source]
        error: toml::de::Error,
    },
}

/// An error that occurred while reading a libtest JSON event stream.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LibtestParseError {
    /// The event stream could not be read.
    #[error("failed to read libtest output at line {line}")]
    Read {
        /// The 1-based line number.
        line: usize,

        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },
}

/// Displays an error along with its chain of sources.
///
/// The top-level error is printed first, followed by each source on its own
/// `caused by` line.
pub struct DisplayErrorChain<E> {
    error: E,
}

impl<E: error::Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain` wrapping the given error.
    pub fn new(error: E) -> Self {
        Self { error }
    }
}

impl<E: error::Error> fmt::Display for DisplayErrorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        let mut source = self.error.source();
        if source.is_some() {
            write!(f, "\ncaused by:")?;
        }
        while let Some(err) = source {
            write!(f, "\n  - {err}")?;
            source = err.source();
        }

        Ok(())
    }
}
