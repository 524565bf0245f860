// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only configuration views supplied by the test host.
//!
//! The host owns where configuration comes from and in which order sources
//! take precedence. Listeners only see a [`ConfigurationParameters`] view, and
//! apply their own defaults when a key is absent.

use crate::errors::TomlParametersError;
use camino::Utf8Path;
use std::collections::BTreeMap;
use tracing::debug;

/// Configuration key that enables unique ID tracking.
///
/// Tracking is disabled unless this is set to `true`.
pub const ENABLED_KEY: &str = "uid.tracking.enabled";

/// Configuration key for a custom output directory.
///
/// Relative values are resolved against the current working directory.
pub const OUTPUT_DIR_KEY: &str = "uid.tracking.output.dir";

/// Configuration key for a custom output file name.
pub const OUTPUT_FILE_KEY: &str = "uid.tracking.output.file";

/// A read-only key-value view of configuration.
pub trait ConfigurationParameters {
    /// Returns the value for `key`, or `None` if it is not set.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns the value for `key` parsed as a boolean.
    ///
    /// `true` and `false` are accepted in any ASCII case, ignoring surrounding
    /// whitespace. Returns `None` if the key is not set or the value is not a
    /// boolean.
    fn get_bool(&self, key: &str) -> Option<bool> {
        let value = self.get(key)?;
        let parsed = parse_bool(&value);
        if parsed.is_none() {
            debug!("ignoring non-boolean value `{value}` for configuration key {key}");
        }
        parsed
    }
}

impl<T: ConfigurationParameters + ?Sized> ConfigurationParameters for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Configuration parameters backed by an in-memory map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapParameters {
    values: BTreeMap<String, String>,
}

impl MapParameters {
    /// Creates an empty set of parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, returning `self` for chaining.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Returns the number of keys set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no keys are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigurationParameters for MapParameters {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Configuration parameters read from environment variables.
///
/// A key maps to a variable name by uppercasing it and replacing `.` and `-`
/// with `_`, so `uid.tracking.output.dir` is read from
/// `UID_TRACKING_OUTPUT_DIR`. An optional prefix is prepended as is.
#[derive(Clone, Debug, Default)]
pub struct EnvParameters {
    prefix: String,
}

impl EnvParameters {
    /// Reads keys from unprefixed environment variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads keys from environment variables starting with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the environment variable name used for `key`.
    pub fn var_name(&self, key: &str) -> String {
        let mut name = self.prefix.clone();
        name.extend(key.chars().map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        }));
        name
    }
}

impl ConfigurationParameters for EnvParameters {
    fn get(&self, key: &str) -> Option<String> {
        let name = self.var_name(key);
        match std::env::var(&name) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                debug!("ignoring non-UTF-8 environment variable {name}");
                None
            }
        }
    }
}

/// Configuration parameters loaded from a TOML file.
///
/// Nested tables are flattened into dotted keys, so
///
/// ```toml
/// [uid.tracking]
/// enabled = true
/// ```
///
/// sets `uid.tracking.enabled` to `"true"`. Arrays and inline values that
/// aren't strings are stored in their TOML representation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TomlParameters {
    values: BTreeMap<String, String>,
}

impl TomlParameters {
    /// Loads parameters from the TOML file at `path`.
    pub fn from_path(path: &Utf8Path) -> Result<Self, TomlParametersError> {
        let contents =
            std::fs::read_to_string(path).map_err(|error| TomlParametersError::Read {
                path: path.to_owned(),
                error,
            })?;
        let params = Self::from_toml_str(&contents).map_err(|error| {
            TomlParametersError::Parse {
                path: path.to_owned(),
                error,
            }
        })?;
        debug!("loaded {} parameters from {path}", params.values.len());
        Ok(params)
    }

    /// Parses parameters from TOML source text.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        let table: toml::Table = toml::from_str(contents)?;
        let mut values = BTreeMap::new();
        flatten_table(None, &table, &mut values);
        Ok(Self { values })
    }
}

impl ConfigurationParameters for TomlParameters {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

fn flatten_table(
    prefix: Option<&str>,
    table: &toml::Table,
    out: &mut BTreeMap<String, String>,
) {
    for (name, value) in table {
        let key = match prefix {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.clone(),
        };
        match value {
            toml::Value::Table(inner) => flatten_table(Some(&key), inner, out),
            toml::Value::String(s) => {
                out.insert(key, s.clone());
            }
            other => {
                out.insert(key, other.to_string());
            }
        }
    }
}
