// src/analysis/filter.rs

use crate::snapshot::Task;
use crate::types::{Priority, Status};

/// Conjunctive task filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub assignee: Option<String>,
    pub category: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn assigned_to(assignee: impl Into<String>) -> Self {
        Self {
            assignee: Some(assignee.into()),
            ..Self::default()
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(ref assignee) = self.assignee {
            if task.assignee.as_deref() != Some(assignee.as_str()) {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if task.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(ref status) = self.status {
            if &task.status != status {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != Some(priority) {
                return false;
            }
        }
        true
    }
}
