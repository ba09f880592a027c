// src/store/toml_store.rs

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::loader::parse_and_validate;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{FieldplanError, Result};
use crate::fs::FileSystem;
use crate::store::{NewTask, TaskStore, TaskUpdate};

/// Task store backed by a single TOML file.
///
/// Every call re-reads the file, so there is no cached state to go stale;
/// an update is read-modify-write of the whole file.
#[derive(Debug)]
pub struct TomlStore {
    path: PathBuf,
    fs: Box<dyn FileSystem>,
    clock: Box<dyn Clock>,
}

impl TomlStore {
    pub fn new(
        path: impl Into<PathBuf>,
        fs: Box<dyn FileSystem>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            path: path.into(),
            fs,
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<ConfigFile> {
        if !self.fs.exists(&self.path) {
            return Err(FieldplanError::ConfigError(format!(
                "task store {:?} does not exist",
                self.path
            )));
        }
        let contents = self.fs.read_to_string(&self.path)?;
        parse_and_validate(&contents)
    }
}

impl TaskStore for TomlStore {
    fn load(&self) -> Result<ConfigFile> {
        let cfg = self.read()?;
        debug!(path = ?self.path, tasks = cfg.task.len(), "loaded task store");
        Ok(cfg)
    }

    fn update_task(&self, id: &str, update: &TaskUpdate) -> Result<()> {
        if update.is_empty() {
            return Err(FieldplanError::ConfigError(format!(
                "empty update for task '{id}'"
            )));
        }

        let mut raw: RawConfigFile = self.read()?.into_raw();
        let task = raw
            .task
            .get_mut(id)
            .ok_or_else(|| FieldplanError::TaskNotFound(id.to_string()))?;

        update.apply(task, self.clock.now());

        let contents = toml::to_string(&raw)?;
        self.fs.write(&self.path, contents.as_bytes())?;

        info!(task = %id, ?update, "updated task");
        Ok(())
    }

    fn create_task(&self, id: &str, task: &NewTask) -> Result<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(FieldplanError::ConfigError(
                "task id must not be empty".to_string(),
            ));
        }
        if task.title.trim().is_empty() {
            return Err(FieldplanError::ConfigError(format!(
                "task '{id}' needs a title"
            )));
        }

        let mut raw: RawConfigFile = self.read()?.into_raw();
        if raw.task.contains_key(id) {
            return Err(FieldplanError::DuplicateTask(id.to_string()));
        }

        let dangling: Vec<&String> = task
            .dependencies
            .iter()
            .filter(|dep| !raw.task.contains_key(dep.as_str()))
            .collect();
        if !dangling.is_empty() {
            warn!(task = %id, ?dangling, "new task depends on ids that are not in the store");
        }

        raw.task
            .insert(id.to_string(), task.to_config(self.clock.now()));

        let contents = toml::to_string(&raw)?;
        self.fs.write(&self.path, contents.as_bytes())?;

        info!(task = %id, title = %task.title, "created task");
        Ok(())
    }
}
