// src/snapshot/task.rs

use chrono::NaiveDate;

use crate::config::model::TaskConfig;
use crate::schedule::parse_iso_date;
use crate::types::{Priority, Status, TaskId};

/// A task as seen by the analysis core.
///
/// Built from a [`TaskConfig`] once per snapshot. `target_date` stays raw
/// because malformed values are legal input; use [`Task::due_date`] to get the
/// parsed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: Status,
    pub target_date: Option<String>,
    /// `None` when unset or not one of the known priorities.
    pub priority: Option<Priority>,
    /// Declared prerequisites, in declared order.
    pub dependencies: Vec<TaskId>,
    pub category: Option<String>,
    pub assignee: Option<String>,
    pub notes: Option<String>,
}

impl Task {
    /// Minimal task: not started, no date, no dependencies.
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: Status::NotStarted,
            target_date: None,
            priority: None,
            dependencies: Vec::new(),
            category: None,
            assignee: None,
            notes: None,
        }
    }

    pub fn from_config(id: TaskId, cfg: &TaskConfig) -> Self {
        Self {
            id,
            title: cfg.title.clone(),
            status: cfg.status.clone(),
            target_date: cfg.target_date.clone(),
            priority: cfg.priority.as_deref().and_then(|p| p.parse().ok()),
            dependencies: cfg.dependencies.clone(),
            category: cfg.category.clone(),
            assignee: cfg.assignee.clone(),
            notes: cfg.notes.clone(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }

    /// Parsed `target_date`, or `None` if missing or malformed.
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.target_date.as_deref().and_then(parse_iso_date)
    }
}
