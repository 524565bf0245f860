// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers shared by unit tests.

use crate::config::{ENABLED_KEY, MapParameters};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Routes log output to the test harness's captured output.
pub(crate) fn test_init() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .init();
    });
}

/// Returns parameters with tracking enabled.
pub(crate) fn enabled_config() -> MapParameters {
    [(ENABLED_KEY, "true")].into_iter().collect()
}
