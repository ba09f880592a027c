// src/snapshot/mod.rs

//! Immutable point-in-time view of the task store.
//!
//! - [`task`] holds the typed [`Task`] record.
//! - [`directory`] holds lookup tables for display names.
//!
//! A [`Snapshot`] is built once per load and handed by reference to every
//! analysis function. Nothing in it is ever mutated; a refresh means loading a
//! new snapshot.

pub mod directory;
pub mod task;

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::model::ConfigFile;
use crate::errors::{FieldplanError, Result};
use crate::types::TaskId;

pub use directory::Directory;
pub use task::Task;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    tasks: BTreeMap<TaskId, Task>,
    directory: Directory,
}

impl Snapshot {
    /// Build a snapshot from a validated store file.
    pub fn from_config(cfg: &ConfigFile) -> Self {
        let tasks: BTreeMap<TaskId, Task> = cfg
            .task
            .iter()
            .map(|(id, task)| (id.clone(), Task::from_config(id.clone(), task)))
            .collect();

        debug!(tasks = tasks.len(), "built snapshot from task store");

        Self {
            tasks,
            directory: Directory::from_config(cfg),
        }
    }

    /// Build a snapshot from loose tasks with an empty directory.
    ///
    /// Fails with [`FieldplanError::DuplicateTask`] if two tasks share an id.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for task in tasks {
            if map.contains_key(&task.id) {
                return Err(FieldplanError::DuplicateTask(task.id));
            }
            map.insert(task.id.clone(), task);
        }
        Ok(Self {
            tasks: map,
            directory: Directory::default(),
        })
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    /// All tasks, ordered by id.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }
}
