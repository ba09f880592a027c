// tests/error_handling.rs
mod common;
use crate::common::builders::{ConfigFileBuilder, TaskConfigBuilder};
use crate::common::{day, init_tracing};

use std::io::Write;

use fieldplan::config::{ConfigFile, load_and_validate};
use fieldplan::errors::FieldplanError;
use fieldplan::snapshot::Snapshot;
use fieldplan::types::Priority;
use tempfile::NamedTempFile;

fn write_store(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn duplicate_task_ids_fail_to_parse() {
    init_tracing();

    let file = write_store(
        r#"
[task.T1]
title = "Pour foundations"

[task.T1]
title = "Pour foundations again"
"#,
    );

    match load_and_validate(file.path()) {
        Err(FieldplanError::TomlError(_)) => {}
        Err(e) => panic!("Expected TomlError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn bad_milestone_date_is_an_invalid_date_error() {
    init_tracing();

    let file = write_store(
        r#"
[milestone.purchasing]
label = "Purchasing deadline"
date = "20/02/2026"
"#,
    );

    match load_and_validate(file.path()) {
        Err(FieldplanError::InvalidDate(msg)) => {
            assert!(msg.contains("purchasing"));
            assert!(msg.contains("20/02/2026"));
        }
        Err(e) => panic!("Expected InvalidDate, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn alert_window_wider_than_warning_window_is_rejected() {
    init_tracing();

    let file = write_store(
        r#"
[milestone.start]
label = "Construction start"
date = "2026-03-01"
warn_within_days = 2
alert_within_days = 5
"#,
    );

    match load_and_validate(file.path()) {
        Err(FieldplanError::ConfigError(msg)) => assert!(msg.contains("alert_within_days")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn zero_top_cascade_is_rejected() {
    init_tracing();

    let raw = ConfigFileBuilder::new().with_top_cascade(0).into_raw();
    match ConfigFile::try_from(raw) {
        Err(FieldplanError::ConfigError(msg)) => assert!(msg.contains("top_cascade")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }

    let raw = ConfigFileBuilder::new()
        .with_critical_min_dependents(0)
        .into_raw();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(FieldplanError::ConfigError(_))
    ));
}

#[test]
fn admin_must_be_a_team_member() {
    init_tracing();

    let file = write_store(
        r#"
[config]
admins = ["felipe"]

[team.ana]
name = "Ana"
"#,
    );

    match load_and_validate(file.path()) {
        Err(FieldplanError::ConfigError(msg)) => assert!(msg.contains("felipe")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let result = load_and_validate(dir.path().join("Fieldplan.toml"));
    assert!(matches!(result, Err(FieldplanError::IoError(_))));
}

#[test]
fn messy_task_data_still_loads() {
    init_tracing();

    let file = write_store(
        r#"
[task.A]
title = "Loop one"
status = "Waiting on supplier"
target_date = "next week"
priority = "asap"
dependencies = ["B", "MISSING"]

[task.B]
title = "Loop two"
dependencies = ["A"]

[task.C]
title = "Native date"
target_date = 2026-02-10
priority = "HIGH"

[task.D]
title = "Numbers where text belongs"
target_date = 0
priority = 3

[task.E]
title = "Timestamp instead of a date"
target_date = 2026-02-11T08:00:00
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    let snapshot = Snapshot::from_config(&cfg);
    assert_eq!(snapshot.len(), 5);

    let a = snapshot.get("A").unwrap();
    assert_eq!(a.priority, None);
    assert_eq!(a.due_date(), None);
    assert_eq!(a.status.as_str(), "Waiting on supplier");
    assert!(!a.is_done());

    let c = snapshot.get("C").unwrap();
    assert_eq!(c.target_date.as_deref(), Some("2026-02-10"));
    assert_eq!(c.due_date(), Some(day("2026-02-10")));
    assert_eq!(c.priority, Some(Priority::High));

    let d = snapshot.get("D").unwrap();
    assert_eq!(d.target_date, None);
    assert_eq!(d.priority, None);

    let e = snapshot.get("E").unwrap();
    assert_eq!(e.due_date(), Some(day("2026-02-11")));
}

#[test]
fn defaults_apply_when_sections_are_absent() {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .with_task("A", TaskConfigBuilder::new("Only task").build())
        .build();

    assert_eq!(cfg.config.top_cascade, 20);
    assert_eq!(cfg.config.critical_min_dependents, 2);
    assert!(cfg.config.admins.is_empty());
    assert!(cfg.milestone.is_empty());
}
