// src/schedule/temporal.rs

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::snapshot::Task;
use crate::types::TaskId;

/// Which date bucket a task falls into relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Overdue,
    DueToday,
    DueTomorrow,
}

/// Disjoint date buckets for one snapshot and reference day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemporalBuckets {
    pub overdue: BTreeSet<TaskId>,
    pub due_today: BTreeSet<TaskId>,
    pub due_tomorrow: BTreeSet<TaskId>,
}

impl TemporalBuckets {
    pub fn get(&self, bucket: Bucket) -> &BTreeSet<TaskId> {
        match bucket {
            Bucket::Overdue => &self.overdue,
            Bucket::DueToday => &self.due_today,
            Bucket::DueTomorrow => &self.due_tomorrow,
        }
    }

    pub fn bucket_of(&self, id: &str) -> Option<Bucket> {
        [Bucket::Overdue, Bucket::DueToday, Bucket::DueTomorrow]
            .into_iter()
            .find(|b| self.get(*b).contains(id))
    }

    pub fn is_overdue(&self, id: &str) -> bool {
        self.overdue.contains(id)
    }
}

/// Bucket for a single task, or `None` if it is done, has no usable date, or
/// is due later than tomorrow.
pub fn bucket_for(task: &Task, today: NaiveDate) -> Option<Bucket> {
    if task.is_done() {
        return None;
    }
    let due = task.due_date()?;

    if due < today {
        Some(Bucket::Overdue)
    } else if due == today {
        Some(Bucket::DueToday)
    } else if today.checked_add_days(Days::new(1)) == Some(due) {
        Some(Bucket::DueTomorrow)
    } else {
        None
    }
}

/// Split tasks into overdue / due today / due tomorrow.
///
/// Done tasks and tasks with a missing or malformed `target_date` are left
/// out of every bucket. A task lands in at most one bucket.
pub fn classify_temporal<'a, I>(tasks: I, today: NaiveDate) -> TemporalBuckets
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut buckets = TemporalBuckets::default();
    let mut unparsed = 0usize;

    for task in tasks {
        if !task.is_done() && task.target_date.is_some() && task.due_date().is_none() {
            unparsed += 1;
            debug!(
                task = %task.id,
                target_date = ?task.target_date,
                "target_date is not YYYY-MM-DD; leaving task out of date buckets"
            );
        }

        match bucket_for(task, today) {
            Some(Bucket::Overdue) => buckets.overdue.insert(task.id.clone()),
            Some(Bucket::DueToday) => buckets.due_today.insert(task.id.clone()),
            Some(Bucket::DueTomorrow) => buckets.due_tomorrow.insert(task.id.clone()),
            None => false,
        };
    }

    debug!(
        %today,
        overdue = buckets.overdue.len(),
        due_today = buckets.due_today.len(),
        due_tomorrow = buckets.due_tomorrow.len(),
        unparsed,
        "classified tasks by target date"
    );

    buckets
}

/// Whole days between `target` and `today`, clamped at zero.
pub fn days_overdue(target: NaiveDate, today: NaiveDate) -> i64 {
    (today - target).num_days().max(0)
}

/// [`days_overdue`] for a task; zero when it has no usable date.
pub fn task_days_overdue(task: &Task, today: NaiveDate) -> i64 {
    task.due_date()
        .map(|due| days_overdue(due, today))
        .unwrap_or(0)
}
