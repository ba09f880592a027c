// src/config/validate.rs

use tracing::warn;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::dag::cycles::find_cycles_in;
use crate::errors::{FieldplanError, Result};
use crate::schedule::parse_iso_date;
use crate::types::Priority;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::FieldplanError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        report_task_anomalies(&raw);
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_global_config(cfg)?;
    validate_milestones(cfg)?;
    validate_admins(cfg)?;
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.top_cascade == 0 {
        return Err(FieldplanError::ConfigError(
            "[config].top_cascade must be >= 1 (got 0)".to_string(),
        ));
    }

    if cfg.config.critical_min_dependents == 0 {
        return Err(FieldplanError::ConfigError(
            "[config].critical_min_dependents must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_milestones(cfg: &RawConfigFile) -> Result<()> {
    for (id, milestone) in cfg.milestone.iter() {
        if parse_iso_date(&milestone.date).is_none() {
            return Err(FieldplanError::InvalidDate(format!(
                "milestone '{}' has invalid date '{}' (expected YYYY-MM-DD)",
                id, milestone.date
            )));
        }
        if milestone.alert_within_days > milestone.warn_within_days {
            return Err(FieldplanError::ConfigError(format!(
                "milestone '{}': alert_within_days ({}) must not exceed warn_within_days ({})",
                id, milestone.alert_within_days, milestone.warn_within_days
            )));
        }
    }
    Ok(())
}

fn validate_admins(cfg: &RawConfigFile) -> Result<()> {
    for admin in cfg.config.admins.iter() {
        if !cfg.team.contains_key(admin) {
            return Err(FieldplanError::ConfigError(format!(
                "admin '{}' is not a member of [team]",
                admin
            )));
        }
    }
    Ok(())
}

/// Task data is never rejected, but a few anomalies are worth a log line at
/// load time.
fn report_task_anomalies(cfg: &RawConfigFile) {
    for (id, task) in cfg.task.iter() {
        if let Some(raw) = task.priority.as_deref() {
            if raw.parse::<Priority>().is_err() {
                warn!(task = %id, priority = %raw, "unknown priority; treating as unset");
            }
        }
    }

    let deps = cfg
        .task
        .iter()
        .map(|(id, task)| (id.as_str(), task.dependencies.iter().map(String::as_str)));
    for cycle in find_cycles_in(deps) {
        warn!(?cycle, "dependency cycle in task data; these tasks can never unblock");
    }
}
