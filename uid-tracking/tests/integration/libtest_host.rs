// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::fixtures::*;
use color_eyre::eyre::Result;
use indoc::indoc;
use pretty_assertions::assert_eq;
use uid_tracking::{
    config::OUTPUT_FILE_KEY, libtest::LibtestEventReader, tracker::UniqueIdTracker,
};

static LIBTEST_OUTPUT: &str = indoc! {r#"
    { "type": "suite", "event": "started", "test_count": 3 }
    { "type": "test", "event": "started", "name": "parse::empty" }
    { "type": "test", "event": "started", "name": "parse::nested" }
    { "type": "test", "name": "parse::empty", "event": "ok", "exec_time": 0.000151 }
    { "type": "test", "event": "started", "name": "parse::slow" }
    { "type": "test", "name": "parse::nested", "event": "failed", "exec_time": 0.002, "stdout": "thread 'parse::nested' panicked\n" }
    { "type": "test", "name": "parse::slow", "event": "ignored", "message": "takes minutes" }
    { "type": "suite", "event": "failed", "passed": 1, "failed": 1, "ignored": 1, "measured": 0, "filtered_out": 0, "exec_time": 0.003 }
"#};

#[test]
fn libtest_stream_writes_ids() -> Result<()> {
    test_init();
    let project = TempProject::new()?;
    let mut config = enabled();
    config.set(OUTPUT_FILE_KEY, "libtest-ids.txt");

    let mut tracker = UniqueIdTracker::with_working_dir(project.root());
    let summary = LibtestEventReader::new(&config)
        .with_binary_id("parser::lib")
        .read_events(LIBTEST_OUTPUT.as_bytes(), &mut tracker)?;
    assert_eq!(summary.tests_finished, 3);

    assert_eq!(
        project.read("libtest-ids.txt")?,
        indoc! {"
            [binary:parser::lib]/[test:parse::empty]
            [binary:parser::lib]/[test:parse::nested]
            [binary:parser::lib]/[test:parse::slow]
        "}
    );
    Ok(())
}

#[test]
fn libtest_stream_disabled() -> Result<()> {
    test_init();
    let project = TempProject::new()?;
    let config = uid_tracking::config::MapParameters::new();

    let mut tracker = UniqueIdTracker::with_working_dir(project.root());
    LibtestEventReader::new(&config).read_events(LIBTEST_OUTPUT.as_bytes(), &mut tracker)?;

    assert_eq!(std::fs::read_dir(project.root())?.count(), 0);
    Ok(())
}
