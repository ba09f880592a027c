// tests/access_control.rs
mod common;
use crate::common::builders::{ConfigFileBuilder, TaskConfigBuilder};
use crate::common::init_tracing;

use std::error::Error;

use fieldplan::access::Viewer;
use fieldplan::analysis::TaskFilter;
use fieldplan::config::ConfigFile;
use fieldplan::errors::FieldplanError;
use fieldplan::snapshot::Snapshot;
use fieldplan::store::TaskUpdate;
use fieldplan::types::{Priority, Status};

type TestResult = Result<(), Box<dyn Error>>;

fn team() -> ConfigFile {
    ConfigFileBuilder::new()
        .with_admin("felipe", "Felipe")
        .with_member("ana", "Ana")
        .with_member("luis", "Luis")
        .with_task("A1", TaskConfigBuilder::new("Ana's task").assignee("ana").build())
        .with_task("L1", TaskConfigBuilder::new("Luis's task").assignee("luis").build())
        .with_task("U1", TaskConfigBuilder::new("Nobody's task").build())
        .build()
}

#[test]
fn viewers_resolve_from_team_and_admin_list() -> TestResult {
    init_tracing();

    let cfg = team();
    assert_eq!(Viewer::resolve(None, &cfg)?, Viewer::Anonymous);
    assert_eq!(Viewer::resolve(Some("ana"), &cfg)?, Viewer::Member("ana".to_string()));
    assert_eq!(Viewer::resolve(Some(" Felipe "), &cfg)?, Viewer::Admin("felipe".to_string()));

    assert!(matches!(
        Viewer::resolve(Some("mallory"), &cfg),
        Err(FieldplanError::PermissionDenied(_))
    ));
    Ok(())
}

#[test]
fn members_only_see_their_own_tasks() -> TestResult {
    init_tracing();

    let cfg = team();
    let snapshot = Snapshot::from_config(&cfg);
    let ana = Viewer::Member("ana".to_string());

    let visible: Vec<&str> = snapshot
        .tasks()
        .filter(|t| ana.can_see(t))
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(visible, vec!["A1"]);

    assert_eq!(ana.scope(TaskFilter::any())?, TaskFilter::assigned_to("ana"));
    assert!(matches!(
        ana.scope(TaskFilter::assigned_to("luis")),
        Err(FieldplanError::PermissionDenied(_))
    ));

    let requested = TaskFilter {
        priority: Some(Priority::Urgent),
        ..TaskFilter::default()
    };
    let scoped = ana.scope(requested)?;
    assert_eq!(scoped.assignee.as_deref(), Some("ana"));
    assert_eq!(scoped.priority, Some(Priority::Urgent));

    let admin = Viewer::Admin("felipe".to_string());
    assert!(snapshot.tasks().all(|t| admin.can_see(t)));
    assert!(snapshot.tasks().all(|t| Viewer::Anonymous.can_see(t)));
    assert_eq!(admin.scope(TaskFilter::assigned_to("luis"))?, TaskFilter::assigned_to("luis"));
    Ok(())
}

#[test]
fn update_rights_depend_on_role() -> TestResult {
    init_tracing();

    let cfg = team();
    let snapshot = Snapshot::from_config(&cfg);
    let a1 = snapshot.get("A1").ok_or("A1")?;
    let l1 = snapshot.get("L1").ok_or("L1")?;

    let status_only = TaskUpdate::status(Status::Done);
    let reassign = TaskUpdate {
        assignee: Some("luis".to_string()),
        ..TaskUpdate::default()
    };

    let ana = Viewer::Member("ana".to_string());
    ana.authorize_update(a1, &status_only)?;
    assert!(ana.authorize_update(a1, &reassign).is_err());
    assert!(ana.authorize_update(l1, &status_only).is_err());

    let admin = Viewer::Admin("felipe".to_string());
    admin.authorize_update(l1, &reassign)?;
    admin.authorize_update(a1, &status_only)?;

    assert!(matches!(
        Viewer::Anonymous.authorize_update(a1, &status_only),
        Err(FieldplanError::PermissionDenied(_))
    ));
    Ok(())
}

#[test]
fn only_admins_add_tasks() -> TestResult {
    init_tracing();

    Viewer::Admin("felipe".to_string()).authorize_create()?;
    assert!(matches!(
        Viewer::Member("ana".to_string()).authorize_create(),
        Err(FieldplanError::PermissionDenied(_))
    ));
    assert!(matches!(
        Viewer::Anonymous.authorize_create(),
        Err(FieldplanError::PermissionDenied(_))
    ));
    Ok(())
}
