// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Track the unique IDs of executed tests and write them to a file.
//!
//! The main type here is [`UniqueIdTracker`](tracker::UniqueIdTracker), a
//! [`TestExecutionListener`](listener::TestExecutionListener) that a test host
//! registers for a run. Once enabled through configuration, it records the
//! unique ID of every test that finishes, regardless of outcome, and writes
//! them to a file one per line when the run finishes. The file can then be
//! fed back to a later run to execute the same set of tests without
//! discovering them again.
//!
//! The output location is resolved by [`output::resolve_output_file`]. For
//! hosts that run Rust's libtest harness, [`libtest::LibtestEventReader`]
//! drives any listener from the harness' JSON event stream.

pub mod config;
pub mod errors;
pub mod identifier;
pub mod libtest;
pub mod listener;
pub mod output;
pub mod tracker;

#[cfg(test)]
mod test_helpers;
