// src/store/mod.rs

//! Task store port.
//!
//! The store is the system of record; the analysis core only ever sees a
//! [`Snapshot`] read from it. Writes go straight to the store and become
//! visible on the next load.

pub mod toml_store;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::config::model::{ConfigFile, TaskConfig};
use crate::errors::Result;
use crate::schedule::DATE_FORMAT;
use crate::snapshot::Snapshot;
use crate::types::{Priority, Status};

pub use toml_store::TomlStore;

pub trait TaskStore {
    /// Read the whole store: settings, lookup tables and every task.
    fn load(&self) -> Result<ConfigFile>;

    /// Change the mutable fields of one task. Last write wins.
    fn update_task(&self, id: &str, update: &TaskUpdate) -> Result<()>;

    /// Add a task under a new id. Fails with `DuplicateTask` if the id is
    /// taken.
    fn create_task(&self, id: &str, task: &NewTask) -> Result<()>;

    /// Read the store and freeze it into a [`Snapshot`].
    fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot::from_config(&self.load()?))
    }
}

/// Changes to a task's mutable fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub status: Option<Status>,
    pub assignee: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

impl TaskUpdate {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// True when the update changes the status and nothing else.
    pub fn only_status(&self) -> bool {
        self.status.is_some()
            && self.assignee.is_none()
            && self.target_date.is_none()
            && self.priority.is_none()
            && self.notes.is_none()
    }

    /// Apply to a stored task and stamp `updated_at`.
    pub fn apply(&self, task: &mut TaskConfig, now: DateTime<Utc>) {
        if let Some(ref status) = self.status {
            task.status = status.clone();
        }
        if let Some(ref assignee) = self.assignee {
            task.assignee = Some(assignee.clone());
        }
        if let Some(date) = self.target_date {
            task.target_date = Some(date.format(DATE_FORMAT).to_string());
        }
        if let Some(priority) = self.priority {
            task.priority = Some(priority.as_str().to_string());
        }
        if let Some(ref notes) = self.notes {
            task.notes = Some(notes.clone());
        }
        task.updated_at = Some(now.to_rfc3339_opts(SecondsFormat::Secs, true));
    }
}

/// A task to be added to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub status: Status,
    pub category: Option<String>,
    pub assignee: Option<String>,
    pub target_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub dependencies: Vec<String>,
    pub notes: Option<String>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Stored form, with `created_at` and `updated_at` both set to `now`.
    pub fn to_config(&self, now: DateTime<Utc>) -> TaskConfig {
        let stamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);
        TaskConfig {
            title: self.title.clone(),
            status: self.status.clone(),
            target_date: self
                .target_date
                .map(|d| d.format(DATE_FORMAT).to_string()),
            priority: self.priority.map(|p| p.as_str().to_string()),
            dependencies: self.dependencies.clone(),
            category: self.category.clone(),
            assignee: self.assignee.clone(),
            notes: self.notes.clone(),
            created_at: Some(stamp.clone()),
            updated_at: Some(stamp),
        }
    }
}
