// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identifiers and outcomes reported by the test host.

use std::fmt;

/// The kind of node a [`TestIdentifier`] refers to in the test tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TestKind {
    /// An executable test with no children.
    Test,

    /// A suite or other grouping of tests.
    Container,

    /// A node that both groups children and is executable itself, for example a
    /// parameterized test.
    ContainerAndTest,
}

impl TestKind {
    /// Returns true if this kind is executable as a test.
    pub fn is_test(self) -> bool {
        matches!(self, Self::Test | Self::ContainerAndTest)
    }

    /// Returns true if this kind can have children.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Container | Self::ContainerAndTest)
    }
}

/// Identifies a single node in the test tree.
///
/// The unique ID is opaque: the host guarantees that it is unique and stable
/// across discovery and execution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TestIdentifier {
    unique_id: String,
    kind: TestKind,
}

impl TestIdentifier {
    /// Creates a new identifier.
    pub fn new(unique_id: impl Into<String>, kind: TestKind) -> Self {
        Self {
            unique_id: unique_id.into(),
            kind,
        }
    }

    /// Creates an identifier for a test.
    pub fn test(unique_id: impl Into<String>) -> Self {
        Self::new(unique_id, TestKind::Test)
    }

    /// Creates an identifier for a container.
    pub fn container(unique_id: impl Into<String>) -> Self {
        Self::new(unique_id, TestKind::Container)
    }

    /// Returns the unique ID.
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Returns the kind of node.
    pub fn kind(&self) -> TestKind {
        self.kind
    }

    /// Returns true if this identifier refers to an executable test.
    pub fn is_test(&self) -> bool {
        self.kind.is_test()
    }

    /// Returns true if this identifier refers to a node that can have children.
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }
}

impl fmt::Display for TestIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.unique_id)
    }
}

/// The outcome of executing a test or container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestExecutionResult {
    /// Execution succeeded.
    Successful,

    /// Execution failed.
    Failed {
        /// A description of the failure, if available.
        message: Option<String>,
    },

    /// Execution started but was aborted, for example by a failed assumption.
    Aborted {
        /// The reason execution was aborted, if available.
        message: Option<String>,
    },

    /// Execution was skipped.
    Skipped {
        /// The reason execution was skipped, if available.
        reason: Option<String>,
    },
}

impl TestExecutionResult {
    /// Returns a short lowercase label for this outcome.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Successful => "successful",
            Self::Failed { .. } => "failed",
            Self::Aborted { .. } => "aborted",
            Self::Skipped { .. } => "skipped",
        }
    }
}
