// tests/graph_properties.rs
mod common;
use crate::common::builders::{ConfigFileBuilder, TaskConfigBuilder};

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use fieldplan::dag::{DependencyGraph, cascade_impact, find_cycles};
use fieldplan::schedule::classify_temporal;
use fieldplan::snapshot::Snapshot;

/// Arbitrary task boards: any task may depend on any index (cycles and
/// self-loops included) and a few indices point past the end, which makes
/// them dangling references.
fn board_strategy(max_tasks: usize) -> impl Strategy<Value = Snapshot> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        let task = (
            proptest::collection::vec(0..num_tasks + 2, 0..4),
            any::<bool>(),
            proptest::option::of(-5i64..5),
        );
        proptest::collection::vec(task, num_tasks).prop_map(|specs| {
            let base = NaiveDate::from_ymd_opt(2026, 2, 15).expect("valid date");
            let mut builder = ConfigFileBuilder::new();
            for (i, (deps, done, offset)) in specs.into_iter().enumerate() {
                let mut task = TaskConfigBuilder::new(&format!("task {i}"));
                for dep in deps {
                    task = task.after(&format!("t{dep}"));
                }
                if done {
                    task = task.done();
                }
                if let Some(offset) = offset {
                    let due = if offset >= 0 {
                        base.checked_add_days(Days::new(offset as u64))
                    } else {
                        base.checked_sub_days(Days::new(offset.unsigned_abs()))
                    };
                    if let Some(due) = due {
                        task = task.due(&due.format("%Y-%m-%d").to_string());
                    }
                }
                builder = builder.with_task(&format!("t{i}"), task.build());
            }
            builder.build_snapshot()
        })
    })
}

proptest! {
    #[test]
    fn blocked_by_is_exactly_the_unsatisfied_dependencies(snapshot in board_strategy(12)) {
        let graph = DependencyGraph::build(&snapshot);
        for task in snapshot.tasks() {
            let expected: Vec<String> = task
                .dependencies
                .iter()
                .filter(|d| !snapshot.get(d).is_some_and(|t| t.is_done()))
                .cloned()
                .collect();
            prop_assert_eq!(graph.blocked_by(&task.id), expected.as_slice());
        }
    }

    #[test]
    fn blocks_mirrors_every_declared_dependency(snapshot in board_strategy(12)) {
        let graph = DependencyGraph::build(&snapshot);
        for task in snapshot.tasks() {
            for dep in &task.dependencies {
                prop_assert!(graph.blocks(dep).contains(&task.id));
            }
        }
        let edges: usize = graph.blocks_map().values().map(BTreeSet::len).sum();
        let declared: usize = snapshot
            .tasks()
            .map(|t| t.dependencies.iter().collect::<BTreeSet<_>>().len())
            .sum();
        prop_assert_eq!(edges, declared);
    }

    #[test]
    fn cascade_is_bounded_and_closed(snapshot in board_strategy(12)) {
        let graph = DependencyGraph::build(&snapshot);
        let blocks = graph.blocks_map();
        for task in snapshot.tasks() {
            let affected = cascade_impact(&task.id, blocks);
            prop_assert!(affected.len() <= snapshot.len());

            // Closed under `blocks`: nothing reachable is missing.
            for id in &affected {
                for next in graph.blocks(id) {
                    prop_assert!(affected.contains(next));
                }
            }
            // The start only shows up when it sits on a cycle.
            if affected.contains(&task.id) {
                prop_assert!(find_cycles(&snapshot).iter().any(|c| c.contains(&task.id)));
            }
        }
    }

    #[test]
    fn date_buckets_are_disjoint_and_skip_done_tasks(snapshot in board_strategy(12)) {
        let today = NaiveDate::from_ymd_opt(2026, 2, 15).expect("valid date");
        let buckets = classify_temporal(snapshot.tasks(), today);

        prop_assert!(buckets.overdue.is_disjoint(&buckets.due_today));
        prop_assert!(buckets.overdue.is_disjoint(&buckets.due_tomorrow));
        prop_assert!(buckets.due_today.is_disjoint(&buckets.due_tomorrow));

        for task in snapshot.tasks().filter(|t| t.is_done()) {
            prop_assert_eq!(buckets.bucket_of(&task.id), None);
        }
    }
}
