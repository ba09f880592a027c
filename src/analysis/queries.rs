// src/analysis/queries.rs

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::analysis::aggregate::UNASSIGNED;
use crate::analysis::{Analysis, TaskFilter};
use crate::schedule::{Bucket, days_overdue};
use crate::snapshot::Task;
use crate::types::{Priority, TaskId};

/// An open task waiting on unfinished dependencies.
#[derive(Debug, Clone)]
pub struct BlockedAlert<'a> {
    pub task: &'a Task,
    /// Unsatisfied dependencies in declared order. May include ids that are
    /// not in the snapshot.
    pub pending: &'a [TaskId],
}

/// An open task that several other tasks depend on directly.
#[derive(Debug, Clone)]
pub struct CriticalTask<'a> {
    pub task: &'a Task,
    pub dependents: &'a BTreeSet<TaskId>,
}

/// An open task and everything that slips with it.
#[derive(Debug, Clone)]
pub struct CascadeEntry<'a> {
    pub task: &'a Task,
    pub affected: BTreeSet<TaskId>,
}

/// An open task that is due (or past due), or flagged urgent.
#[derive(Debug, Clone)]
pub struct UrgentTask<'a> {
    pub task: &'a Task,
    pub due: NaiveDate,
    pub days_overdue: i64,
}

impl<'a> Analysis<'a> {
    /// Whether `id` has at least one unsatisfied dependency.
    pub fn is_blocked(&self, id: &str) -> bool {
        self.graph.is_blocked(id)
    }

    /// Unsatisfied dependencies of `id` (empty for unknown ids).
    pub fn blocked_by(&self, id: &str) -> &[TaskId] {
        self.graph.blocked_by(id)
    }

    /// Direct dependents of `id` (empty for unknown ids).
    pub fn blocks(&self, id: &str) -> &BTreeSet<TaskId> {
        self.graph.blocks(id)
    }

    fn open_tasks<'s>(&'s self, filter: &'s TaskFilter) -> impl Iterator<Item = &'a Task> + 's {
        self.snapshot
            .tasks()
            .filter(move |t| !t.is_done() && filter.matches(t))
    }

    /// Open tasks with unsatisfied dependencies, earliest target date first.
    /// Tasks without a usable date go last; ties break on id.
    pub fn blocked_alerts(&self, filter: &TaskFilter) -> Vec<BlockedAlert<'_>> {
        let mut alerts: Vec<BlockedAlert<'_>> = self
            .open_tasks(filter)
            .filter_map(|task| {
                let pending = self.graph.blocked_by(&task.id);
                (!pending.is_empty()).then_some(BlockedAlert { task, pending })
            })
            .collect();

        alerts.sort_by(|a, b| {
            let (da, db) = (a.task.due_date(), b.task.due_date());
            da.is_none()
                .cmp(&db.is_none())
                .then_with(|| da.cmp(&db))
                .then_with(|| a.task.id.cmp(&b.task.id))
        });
        alerts
    }

    /// Open tasks with at least `min_dependents` direct dependents, most
    /// dependents first, ties by id.
    pub fn critical_tasks(
        &self,
        min_dependents: usize,
        filter: &TaskFilter,
    ) -> Vec<CriticalTask<'_>> {
        let mut critical: Vec<CriticalTask<'_>> = self
            .open_tasks(filter)
            .filter_map(|task| {
                let dependents = self.graph.blocks(&task.id);
                (dependents.len() >= min_dependents).then_some(CriticalTask { task, dependents })
            })
            .collect();

        critical.sort_by(|a, b| {
            b.dependents
                .len()
                .cmp(&a.dependents.len())
                .then_with(|| a.task.id.cmp(&b.task.id))
        });
        critical
    }

    /// The `n` open tasks with the largest non-empty cascade, largest first,
    /// ties by id.
    pub fn top_cascade(&self, n: usize, filter: &TaskFilter) -> Vec<CascadeEntry<'_>> {
        let mut entries: Vec<CascadeEntry<'_>> = self
            .open_tasks(filter)
            .filter_map(|task| {
                let affected = self.cascade(&task.id);
                (!affected.is_empty()).then_some(CascadeEntry { task, affected })
            })
            .collect();

        entries.sort_by(|a, b| {
            b.affected
                .len()
                .cmp(&a.affected.len())
                .then_with(|| a.task.id.cmp(&b.task.id))
        });
        entries.truncate(n);
        entries
    }

    /// Open tasks with a usable date that is today or earlier, plus open
    /// `urgent` tasks with any usable date. Most days overdue first, then
    /// earliest date, then id.
    pub fn urgent_tasks(&self, filter: &TaskFilter) -> Vec<UrgentTask<'_>> {
        let today = self.today;
        let mut urgent: Vec<UrgentTask<'_>> = self
            .open_tasks(filter)
            .filter_map(|task| {
                let due = task.due_date()?;
                let flagged = task.priority == Some(Priority::Urgent);
                (due <= today || flagged).then(|| UrgentTask {
                    task,
                    due,
                    days_overdue: days_overdue(due, today),
                })
            })
            .collect();

        urgent.sort_by(|a, b| {
            b.days_overdue
                .cmp(&a.days_overdue)
                .then_with(|| a.due.cmp(&b.due))
                .then_with(|| a.task.id.cmp(&b.task.id))
        });
        urgent
    }

    /// Tasks of one date bucket grouped by assignee id. Tasks without an
    /// assignee are grouped under [`UNASSIGNED`].
    pub fn day_panel(&self, bucket: Bucket, filter: &TaskFilter) -> BTreeMap<String, Vec<&Task>> {
        let mut panel: BTreeMap<String, Vec<&Task>> = BTreeMap::new();
        for id in self.buckets.get(bucket) {
            let Some(task) = self.snapshot.get(id) else {
                continue;
            };
            if !filter.matches(task) {
                continue;
            }
            let key = task.assignee.clone().unwrap_or_else(|| UNASSIGNED.to_string());
            panel.entry(key).or_default().push(task);
        }
        panel
    }
}
