#![allow(dead_code)]

use fieldplan::config::{
    CategoryConfig, ConfigFile, MemberConfig, MilestoneConfig, RawConfigFile, StatusConfig,
    TaskConfig,
};
use fieldplan::snapshot::Snapshot;
use fieldplan::types::Status;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_project(mut self, name: &str, site: &str) -> Self {
        self.config.project.name = Some(name.to_string());
        self.config.project.site = Some(site.to_string());
        self
    }

    pub fn with_task(mut self, id: &str, task: TaskConfig) -> Self {
        self.config.task.insert(id.to_string(), task);
        self
    }

    pub fn with_member(mut self, id: &str, name: &str) -> Self {
        self.config.team.insert(
            id.to_string(),
            MemberConfig {
                name: name.to_string(),
            },
        );
        self
    }

    /// Adds the member and lists them in `[config].admins`.
    pub fn with_admin(self, id: &str, name: &str) -> Self {
        let mut builder = self.with_member(id, name);
        builder.config.config.admins.push(id.to_string());
        builder
    }

    pub fn with_category(mut self, id: &str, name: &str, icon: Option<&str>) -> Self {
        self.config.category.insert(
            id.to_string(),
            CategoryConfig {
                name: name.to_string(),
                icon: icon.map(str::to_string),
            },
        );
        self
    }

    pub fn with_status(mut self, id: &str, name: &str, order: u32) -> Self {
        self.config.status.insert(
            id.to_string(),
            StatusConfig {
                name: name.to_string(),
                color: None,
                order: Some(order),
            },
        );
        self
    }

    pub fn with_milestone(mut self, id: &str, label: &str, date: &str) -> Self {
        self.config.milestone.insert(
            id.to_string(),
            MilestoneConfig {
                label: label.to_string(),
                date: date.to_string(),
                warn_within_days: 3,
                alert_within_days: 1,
            },
        );
        self
    }

    pub fn with_top_cascade(mut self, n: usize) -> Self {
        self.config.config.top_cascade = n;
        self
    }

    pub fn with_critical_min_dependents(mut self, n: usize) -> Self {
        self.config.config.critical_min_dependents = n;
        self
    }

    /// The unvalidated shape, for tests that exercise validation itself.
    pub fn into_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn to_toml(&self) -> String {
        toml_string(&self.config)
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }

    pub fn build_snapshot(self) -> Snapshot {
        Snapshot::from_config(&self.build())
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn toml_string(raw: &RawConfigFile) -> String {
    toml::to_string(raw).expect("Failed to serialize config from builder")
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            task: TaskConfig {
                title: title.to_string(),
                status: Status::NotStarted,
                target_date: None,
                priority: None,
                dependencies: vec![],
                category: None,
                assignee: None,
                notes: None,
                created_at: None,
                updated_at: None,
            },
        }
    }

    pub fn status(mut self, status: &str) -> Self {
        self.task.status = Status::from(status.to_string());
        self
    }

    pub fn done(self) -> Self {
        self.status("done")
    }

    /// Raw target date; deliberately unchecked so tests can feed garbage.
    pub fn due(mut self, date: &str) -> Self {
        self.task.target_date = Some(date.to_string());
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.dependencies.push(dep.to_string());
        self
    }

    pub fn priority(mut self, priority: &str) -> Self {
        self.task.priority = Some(priority.to_string());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.task.category = Some(category.to_string());
        self
    }

    pub fn assignee(mut self, assignee: &str) -> Self {
        self.task.assignee = Some(assignee.to_string());
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.task.notes = Some(notes.to_string());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}
