// src/analysis/aggregate.rs

//! Plain grouping counts. Nothing clever here.

use std::collections::BTreeMap;

use crate::analysis::{Analysis, TaskFilter};
use crate::snapshot::Task;
use crate::types::Status;

/// Group key for tasks without an assignee.
pub const UNASSIGNED: &str = "unassigned";

/// Group key for tasks without a category.
pub const UNCATEGORISED: &str = "uncategorised";

/// Headline numbers for the summary view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Kpis {
    pub total: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub review: usize,
    pub blocked: usize,
    pub done: usize,
    /// Tasks in any status outside the well-known set.
    pub other: usize,
    pub overdue: usize,
}

pub fn count_by_status<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> BTreeMap<Status, usize> {
    let mut counts = BTreeMap::new();
    for task in tasks {
        *counts.entry(task.status.clone()).or_insert(0) += 1;
    }
    counts
}

pub fn count_by_category<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> BTreeMap<String, usize> {
    count_by_key(tasks, |t| t.category.as_deref().unwrap_or(UNCATEGORISED))
}

pub fn count_by_assignee<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> BTreeMap<String, usize> {
    count_by_key(tasks, |t| t.assignee.as_deref().unwrap_or(UNASSIGNED))
}

fn count_by_key<'a, F>(tasks: impl IntoIterator<Item = &'a Task>, key: F) -> BTreeMap<String, usize>
where
    F: Fn(&'a Task) -> &'a str,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for task in tasks {
        *counts.entry(key(task).to_string()).or_insert(0) += 1;
    }
    counts
}

impl<'a> Analysis<'a> {
    /// Tasks matching `filter`, in id order. Includes done tasks.
    pub fn tasks_matching<'s>(
        &'s self,
        filter: &'s TaskFilter,
    ) -> impl Iterator<Item = &'a Task> + 's {
        self.snapshot.tasks().filter(move |t| filter.matches(t))
    }

    pub fn kpis(&self, filter: &TaskFilter) -> Kpis {
        let mut kpis = Kpis::default();
        for task in self.tasks_matching(filter) {
            kpis.total += 1;
            match task.status {
                Status::NotStarted => kpis.not_started += 1,
                Status::InProgress => kpis.in_progress += 1,
                Status::Review => kpis.review += 1,
                Status::Blocked => kpis.blocked += 1,
                Status::Done => kpis.done += 1,
                Status::Other(_) => kpis.other += 1,
            }
            if self.buckets.is_overdue(&task.id) {
                kpis.overdue += 1;
            }
        }
        kpis
    }

    pub fn status_counts(&self, filter: &TaskFilter) -> BTreeMap<Status, usize> {
        count_by_status(self.tasks_matching(filter))
    }

    pub fn category_counts(&self, filter: &TaskFilter) -> BTreeMap<String, usize> {
        count_by_category(self.tasks_matching(filter))
    }

    pub fn assignee_counts(&self, filter: &TaskFilter) -> BTreeMap<String, usize> {
        count_by_assignee(self.tasks_matching(filter))
    }
}
