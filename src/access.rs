// src/access.rs

//! Who may see and change what.
//!
//! The contract only; verifying who a user really is belongs to whatever
//! sits in front of this crate.
//!
//! - Anonymous viewers and admins see every task. Members see only the tasks
//!   assigned to them.
//! - Anonymous viewers cannot change anything.
//! - Members may change the status of their own tasks and nothing else.
//! - Admins may change every mutable field of every task, and only admins
//!   may add tasks.

use tracing::debug;

use crate::analysis::TaskFilter;
use crate::config::model::ConfigFile;
use crate::errors::{FieldplanError, Result};
use crate::snapshot::Task;
use crate::store::TaskUpdate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    Member(String),
    Admin(String),
}

impl Viewer {
    /// Resolve a user id against `[team]` and `[config].admins`.
    pub fn resolve(user: Option<&str>, cfg: &ConfigFile) -> Result<Self> {
        let Some(user) = user else {
            return Ok(Viewer::Anonymous);
        };
        let user = user.trim().to_lowercase();

        if !cfg.team.contains_key(&user) {
            return Err(FieldplanError::PermissionDenied(format!(
                "unknown user '{user}'"
            )));
        }

        let viewer = if cfg.config.admins.iter().any(|a| a == &user) {
            Viewer::Admin(user)
        } else {
            Viewer::Member(user)
        };
        debug!(?viewer, "resolved viewer");
        Ok(viewer)
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Viewer::Anonymous => None,
            Viewer::Member(id) | Viewer::Admin(id) => Some(id.as_str()),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Viewer::Admin(_))
    }

    /// Whether the task shows up in this viewer's views.
    pub fn can_see(&self, task: &Task) -> bool {
        match self {
            Viewer::Anonymous | Viewer::Admin(_) => true,
            Viewer::Member(id) => task.assignee.as_deref() == Some(id.as_str()),
        }
    }

    /// Narrow a requested filter to what this viewer is allowed to see.
    ///
    /// Members always get their personal view; asking for someone else's
    /// tasks is an error rather than a silently empty list.
    pub fn scope(&self, requested: TaskFilter) -> Result<TaskFilter> {
        match self {
            Viewer::Anonymous | Viewer::Admin(_) => Ok(requested),
            Viewer::Member(id) => {
                if let Some(other) = requested.assignee.as_deref() {
                    if other != id.as_str() {
                        return Err(FieldplanError::PermissionDenied(format!(
                            "'{id}' may only view their own tasks (asked for '{other}')"
                        )));
                    }
                }
                Ok(TaskFilter {
                    assignee: Some(id.clone()),
                    ..requested
                })
            }
        }
    }

    /// Check that this viewer may apply `update` to `task`.
    pub fn authorize_update(&self, task: &Task, update: &TaskUpdate) -> Result<()> {
        match self {
            Viewer::Admin(_) => Ok(()),
            Viewer::Anonymous => Err(FieldplanError::PermissionDenied(
                "sign in to update tasks".to_string(),
            )),
            Viewer::Member(id) => {
                if task.assignee.as_deref() != Some(id.as_str()) {
                    return Err(FieldplanError::PermissionDenied(format!(
                        "task '{}' is not assigned to '{}'",
                        task.id, id
                    )));
                }
                if !update.only_status() {
                    return Err(FieldplanError::PermissionDenied(format!(
                        "'{id}' may only change the status of their tasks"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Check that this viewer may add new tasks.
    pub fn authorize_create(&self) -> Result<()> {
        if self.is_admin() {
            return Ok(());
        }
        Err(FieldplanError::PermissionDenied(match self.user_id() {
            Some(id) => format!("'{id}' may not add tasks"),
            None => "sign in to add tasks".to_string(),
        }))
    }
}
