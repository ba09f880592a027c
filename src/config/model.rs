// src/config/model.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::types::Status;

/// Top-level task store file as read from TOML.
///
/// ```toml
/// [config]
/// top_cascade = 20
/// critical_min_dependents = 2
/// admins = ["felipe"]
///
/// [milestone.purchasing]
/// label = "Purchasing deadline"
/// date = "2026-02-20"
///
/// [team.felipe]
/// name = "Felipe"
///
/// [task.T02]
/// title = "Pour foundations"
/// status = "in_progress"
/// target_date = "2026-02-10"
/// dependencies = ["T01"]
/// ```
///
/// All sections are optional and have reasonable defaults. This is the
/// unvalidated shape; see [`ConfigFile`] for the validated one.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawConfigFile {
    /// Analysis settings from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Descriptive project header from `[project]`.
    #[serde(default)]
    pub project: ProjectSection,

    /// Dated project milestones from `[milestone.<id>]`.
    #[serde(default)]
    pub milestone: BTreeMap<String, MilestoneConfig>,

    /// Team members from `[team.<id>]`.
    #[serde(default)]
    pub team: BTreeMap<String, MemberConfig>,

    /// Display metadata for statuses from `[status.<id>]`.
    #[serde(default)]
    pub status: BTreeMap<String, StatusConfig>,

    /// Task categories from `[category.<id>]`.
    #[serde(default)]
    pub category: BTreeMap<String, CategoryConfig>,

    /// All tasks from `[task.<id>]`.
    ///
    /// Keys are the task ids, so TOML itself rejects duplicates.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// A [`RawConfigFile`] that passed validation.
///
/// Only obtainable through `ConfigFile::try_from(raw)` (or
/// [`ConfigFile::new_unchecked`] for callers that validated themselves).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub project: ProjectSection,
    pub milestone: BTreeMap<String, MilestoneConfig>,
    pub team: BTreeMap<String, MemberConfig>,
    pub status: BTreeMap<String, StatusConfig>,
    pub category: BTreeMap<String, CategoryConfig>,
    pub task: BTreeMap<String, TaskConfig>,
}

impl ConfigFile {
    pub fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            config: raw.config,
            project: raw.project,
            milestone: raw.milestone,
            team: raw.team,
            status: raw.status,
            category: raw.category,
            task: raw.task,
        }
    }

    /// Turn back into the serializable shape (used when writing the store).
    pub fn into_raw(self) -> RawConfigFile {
        RawConfigFile {
            config: self.config,
            project: self.project,
            milestone: self.milestone,
            team: self.team,
            status: self.status,
            category: self.category,
            task: self.task,
        }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfigSection {
    /// How many tasks the cascade ranking shows.
    #[serde(default = "default_top_cascade")]
    pub top_cascade: usize,

    /// Minimum number of direct dependents for a task to count as a
    /// critical chain link.
    #[serde(default = "default_critical_min_dependents")]
    pub critical_min_dependents: usize,

    /// Team ids allowed to edit every field of every task.
    #[serde(default)]
    pub admins: Vec<String>,
}

fn default_top_cascade() -> usize {
    20
}

fn default_critical_min_dependents() -> usize {
    2
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            top_cascade: default_top_cascade(),
            critical_min_dependents: default_critical_min_dependents(),
            admins: Vec::new(),
        }
    }
}

/// `[project]` section. Purely descriptive.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProjectSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

/// `[milestone.<id>]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MilestoneConfig {
    pub label: String,

    /// `YYYY-MM-DD`; checked during validation.
    pub date: String,

    /// Countdown turns to a warning at or below this many days.
    #[serde(default = "default_warn_within_days")]
    pub warn_within_days: i64,

    /// Countdown turns to an alert at or below this many days.
    #[serde(default = "default_alert_within_days")]
    pub alert_within_days: i64,
}

fn default_warn_within_days() -> i64 {
    3
}

fn default_alert_within_days() -> i64 {
    1
}

/// `[team.<id>]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MemberConfig {
    pub name: String,
}

/// `[status.<id>]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Board column order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// `[category.<id>]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// `[task.<id>]` section.
///
/// Task data comes from an uncurated external store, so most fields are
/// optional and kept as raw strings; the snapshot layer interprets them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaskConfig {
    pub title: String,

    #[serde(default)]
    pub status: Status,

    /// Expected to be `YYYY-MM-DD`; anything else is tolerated and simply
    /// excluded from date-based views. A TOML date literal is accepted too.
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_date: Option<String>,

    /// Expected to be one of `urgent`, `high`, `medium`, `low`.
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub priority: Option<String>,

    /// Ids of tasks that must be `done` before this one is unblocked.
    ///
    /// May reference ids that are not in the store.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Accept any TOML value for a loosely typed task field.
///
/// Strings pass through and date literals become their `YYYY-MM-DD` text.
/// Anything else is logged and dropped, so one odd record never fails the
/// whole file.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<toml::Value>::deserialize(deserializer)?;
    Ok(match value {
        None => None,
        Some(toml::Value::String(s)) => Some(s),
        Some(toml::Value::Datetime(dt)) => Some(
            dt.date
                .map(|d| d.to_string())
                .unwrap_or_else(|| dt.to_string()),
        ),
        Some(other) => {
            warn!(
                value = %other,
                kind = other.type_str(),
                "task field is neither text nor a date; treating as unset"
            );
            None
        }
    })
}
