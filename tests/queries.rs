// tests/queries.rs
mod common;
use crate::common::builders::{ConfigFileBuilder, TaskConfigBuilder};
use crate::common::{day, init_tracing};

use std::error::Error;

use fieldplan::analysis::{Analysis, CategoryHealth, TaskFilter, UNASSIGNED, UNCATEGORISED};
use fieldplan::schedule::{Bucket, CountdownLevel, countdowns};
use fieldplan::snapshot::Snapshot;
use fieldplan::types::{Priority, Status};

type TestResult = Result<(), Box<dyn Error>>;

const TODAY: &str = "2026-02-15";

/// A small irrigation build:
///
/// ```text
/// P01 (done) -> P02 -> P03 -> P05
///                  \-> P04 -/
/// P06 -> P07        P08 (no deps, urgent, far future)
/// ```
fn board() -> ConfigFileBuilder {
    ConfigFileBuilder::new()
        .with_member("ana", "Ana")
        .with_member("luis", "Luis")
        .with_category("water", "Irrigation", Some("💧"))
        .with_category("civil", "Civil works", None)
        .with_task(
            "P01",
            TaskConfigBuilder::new("Survey plot")
                .done()
                .due("2026-02-01")
                .category("civil")
                .assignee("ana")
                .build(),
        )
        .with_task(
            "P02",
            TaskConfigBuilder::new("Dig trenches")
                .status("in_progress")
                .due("2026-02-10")
                .after("P01")
                .category("civil")
                .assignee("luis")
                .priority("high")
                .build(),
        )
        .with_task(
            "P03",
            TaskConfigBuilder::new("Lay main line")
                .due("2026-02-15")
                .after("P02")
                .category("water")
                .assignee("ana")
                .notes("pipes on site")
                .build(),
        )
        .with_task(
            "P04",
            TaskConfigBuilder::new("Lay drip lines")
                .due("2026-02-16")
                .after("P02")
                .category("water")
                .build(),
        )
        .with_task(
            "P05",
            TaskConfigBuilder::new("Pressure test")
                .due("not a date")
                .after("P03")
                .after("P04")
                .category("water")
                .assignee("luis")
                .build(),
        )
        .with_task(
            "P06",
            TaskConfigBuilder::new("Order pump")
                .status("review")
                .due("2026-02-08")
                .build(),
        )
        .with_task("P07", TaskConfigBuilder::new("Install pump").after("P06").build())
        .with_task(
            "P08",
            TaskConfigBuilder::new("Request permit")
                .due("2026-03-30")
                .priority("urgent")
                .category("civil")
                .build(),
        )
}

fn ids<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    items.into_iter().collect()
}

#[test]
fn blocked_alerts_list_pending_dependencies_ordered_by_date() -> TestResult {
    init_tracing();

    let snapshot = board().build_snapshot();
    let analysis = Analysis::new(&snapshot, day(TODAY));
    let alerts = analysis.blocked_alerts(&TaskFilter::any());

    // P02 is unblocked because P01 is done. Undated / malformed go last.
    let order = ids(alerts.iter().map(|a| a.task.id.as_str()));
    assert_eq!(order, vec!["P03", "P04", "P05", "P07"]);

    let p05 = alerts.iter().find(|a| a.task.id == "P05").ok_or("P05 alert")?;
    assert_eq!(p05.pending, ["P03".to_string(), "P04".to_string()]);
    Ok(())
}

#[test]
fn critical_tasks_need_enough_direct_dependents() -> TestResult {
    init_tracing();

    let snapshot = board().build_snapshot();
    let analysis = Analysis::new(&snapshot, day(TODAY));

    let critical = analysis.critical_tasks(2, &TaskFilter::any());
    let order = ids(critical.iter().map(|c| c.task.id.as_str()));
    assert_eq!(order, vec!["P02"]);
    assert_eq!(critical[0].dependents.len(), 2);

    // Lower threshold: most dependents first, ties by id. Done P01 is left out.
    let critical = analysis.critical_tasks(1, &TaskFilter::any());
    let order = ids(critical.iter().map(|c| c.task.id.as_str()));
    assert_eq!(order, vec!["P02", "P03", "P04", "P06"]);
    Ok(())
}

#[test]
fn top_cascade_ranks_by_transitive_reach() -> TestResult {
    init_tracing();

    let snapshot = board().build_snapshot();
    let analysis = Analysis::new(&snapshot, day(TODAY));

    let top = analysis.top_cascade(3, &TaskFilter::any());
    let order = ids(top.iter().map(|e| e.task.id.as_str()));
    assert_eq!(order, vec!["P02", "P03", "P04"]);
    assert_eq!(top[0].affected.len(), 3);

    // Done tasks never rank, even though their cascade is large.
    assert_eq!(analysis.cascade("P01").len(), 4);
    let all = analysis.top_cascade(100, &TaskFilter::any());
    assert!(all.iter().all(|e| e.task.id != "P01"));
    assert!(all.iter().all(|e| !e.affected.is_empty()));
    Ok(())
}

#[test]
fn urgent_tasks_are_due_or_flagged() -> TestResult {
    init_tracing();

    let snapshot = board().build_snapshot();
    let analysis = Analysis::new(&snapshot, day(TODAY));

    let urgent = analysis.urgent_tasks(&TaskFilter::any());
    let order = ids(urgent.iter().map(|u| u.task.id.as_str()));
    // P06 is 7 days late, P02 5 days, P03 due today, P08 flagged urgent.
    assert_eq!(order, vec!["P06", "P02", "P03", "P08"]);
    assert_eq!(urgent[0].days_overdue, 7);
    assert_eq!(urgent[3].days_overdue, 0);
    Ok(())
}

#[test]
fn kpis_and_counts_cover_every_matching_task() -> TestResult {
    init_tracing();

    let snapshot = board().build_snapshot();
    let analysis = Analysis::new(&snapshot, day(TODAY));
    let kpis = analysis.kpis(&TaskFilter::any());

    assert_eq!(kpis.total, 8);
    assert_eq!(kpis.done, 1);
    assert_eq!(kpis.in_progress, 1);
    assert_eq!(kpis.review, 1);
    assert_eq!(kpis.not_started, 5);
    assert_eq!(kpis.overdue, 2);

    let by_status = analysis.status_counts(&TaskFilter::any());
    assert_eq!(by_status[&Status::NotStarted], 5);

    let by_category = analysis.category_counts(&TaskFilter::any());
    assert_eq!(by_category["water"], 3);
    assert_eq!(by_category["civil"], 3);
    assert_eq!(by_category[UNCATEGORISED], 2);

    let by_assignee = analysis.assignee_counts(&TaskFilter::any());
    assert_eq!(by_assignee["ana"], 2);
    assert_eq!(by_assignee["luis"], 2);
    assert_eq!(by_assignee[UNASSIGNED], 4);
    Ok(())
}

#[test]
fn filter_is_conjunctive() -> TestResult {
    init_tracing();

    let snapshot = board().build_snapshot();
    let analysis = Analysis::new(&snapshot, day(TODAY));

    let filter = TaskFilter {
        category: Some("civil".to_string()),
        priority: Some(Priority::High),
        ..TaskFilter::default()
    };
    let matched = ids(analysis.tasks_matching(&filter).map(|t| t.id.as_str()));
    assert_eq!(matched, vec!["P02"]);

    let filter = TaskFilter {
        assignee: Some("ana".to_string()),
        status: Some(Status::Done),
        ..TaskFilter::default()
    };
    let matched = ids(analysis.tasks_matching(&filter).map(|t| t.id.as_str()));
    assert_eq!(matched, vec!["P01"]);

    assert!(TaskFilter::any().is_unrestricted());
    assert!(!TaskFilter::assigned_to("ana").is_unrestricted());
    Ok(())
}

#[test]
fn day_panel_groups_bucket_by_assignee() -> TestResult {
    init_tracing();

    let snapshot = board().build_snapshot();
    let analysis = Analysis::new(&snapshot, day(TODAY));

    let overdue = analysis.day_panel(Bucket::Overdue, &TaskFilter::any());
    assert_eq!(overdue.keys().map(String::as_str).collect::<Vec<_>>(), vec!["luis", UNASSIGNED]);
    assert_eq!(overdue["luis"][0].id, "P02");
    assert_eq!(overdue[UNASSIGNED][0].id, "P06");

    let today = analysis.day_panel(Bucket::DueToday, &TaskFilter::any());
    assert_eq!(today["ana"][0].id, "P03");

    let tomorrow = analysis.day_panel(Bucket::DueTomorrow, &TaskFilter::assigned_to("ana"));
    assert!(tomorrow.is_empty());
    Ok(())
}

#[test]
fn category_health_uses_four_tiers() {
    init_tracing();

    assert_eq!(CategoryHealth::from_counts(10, 10, 1), CategoryHealth::Overdue);
    assert_eq!(CategoryHealth::from_counts(7, 10, 0), CategoryHealth::OnTrack);
    assert_eq!(CategoryHealth::from_counts(69, 100, 0), CategoryHealth::Progressing);
    assert_eq!(CategoryHealth::from_counts(3, 10, 0), CategoryHealth::Progressing);
    assert_eq!(CategoryHealth::from_counts(29, 100, 0), CategoryHealth::Lagging);
    assert_eq!(CategoryHealth::from_counts(0, 0, 0), CategoryHealth::Lagging);
}

#[test]
fn category_progress_flags_overdue_categories() -> TestResult {
    init_tracing();

    let snapshot = board().build_snapshot();
    let analysis = Analysis::new(&snapshot, day(TODAY));
    let progress = analysis.category_progress(&TaskFilter::any());

    let civil = progress.iter().find(|p| p.category == "civil").ok_or("civil")?;
    assert_eq!((civil.total, civil.done, civil.overdue), (3, 1, 1));
    assert_eq!(civil.health, CategoryHealth::Overdue);
    assert_eq!(civil.percent_done(), 33);

    let water = progress.iter().find(|p| p.category == "water").ok_or("water")?;
    assert_eq!(water.health, CategoryHealth::Lagging);

    let dir = snapshot.directory();
    assert_eq!(dir.category_label("water"), "💧 Irrigation");
    assert_eq!(dir.category_label("civil"), "Civil works");
    assert_eq!(dir.category_label("gone"), "gone");
    Ok(())
}

#[test]
fn display_names_fall_back_to_raw_ids() -> TestResult {
    init_tracing();

    let cfg = board().with_status("in_progress", "In progress", 2).build();
    let snapshot = Snapshot::from_config(&cfg);
    let dir = snapshot.directory();

    assert_eq!(dir.member_name("ana"), "Ana");
    assert_eq!(dir.member_name("ghost"), "ghost");
    assert_eq!(dir.status_name(&Status::InProgress), "In progress");
    assert_eq!(dir.status_name(&Status::Review), "review");
    assert_eq!(dir.status_order(&Status::InProgress), 2);
    assert_eq!(dir.status_order(&Status::Review), u32::MAX);
    Ok(())
}

#[test]
fn milestone_countdowns_escalate_as_the_date_nears() -> TestResult {
    init_tracing();

    let cfg = board()
        .with_milestone("purchasing", "Purchasing deadline", "2026-02-20")
        .with_milestone("start", "Construction start", "2026-02-16")
        .with_milestone("kickoff", "Kickoff", "2026-01-05")
        .build();

    let c = countdowns(&cfg, day(TODAY));
    let order: Vec<&str> = c.iter().map(|c| c.milestone.id.as_str()).collect();
    assert_eq!(order, vec!["kickoff", "start", "purchasing"]);

    assert_eq!(c[0].days_remaining, -41);
    assert_eq!(c[0].level, CountdownLevel::Alert);
    assert_eq!(c[1].days_remaining, 1);
    assert_eq!(c[1].level, CountdownLevel::Alert);
    assert_eq!(c[2].days_remaining, 5);
    assert_eq!(c[2].level, CountdownLevel::Clear);

    let c = countdowns(&cfg, day("2026-02-17"));
    assert_eq!(c[2].level, CountdownLevel::Warning);
    Ok(())
}
