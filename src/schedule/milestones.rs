// src/schedule/milestones.rs

//! Countdowns to the project's dated milestones (purchasing deadline,
//! construction start, ...).

use chrono::NaiveDate;
use tracing::warn;

use crate::config::model::ConfigFile;
use crate::schedule::parse_iso_date;

/// How close a milestone is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CountdownLevel {
    /// At or below `alert_within_days` (includes milestones already passed).
    Alert,
    /// At or below `warn_within_days`.
    Warning,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub id: String,
    pub label: String,
    pub date: NaiveDate,
    pub warn_within_days: i64,
    pub alert_within_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    pub milestone: Milestone,
    /// Negative once the milestone has passed.
    pub days_remaining: i64,
    pub level: CountdownLevel,
}

impl Milestone {
    pub fn countdown(&self, today: NaiveDate) -> Countdown {
        let days_remaining = (self.date - today).num_days();
        let level = if days_remaining <= self.alert_within_days {
            CountdownLevel::Alert
        } else if days_remaining <= self.warn_within_days {
            CountdownLevel::Warning
        } else {
            CountdownLevel::Clear
        };

        Countdown {
            milestone: self.clone(),
            days_remaining,
            level,
        }
    }
}

/// Milestones from a validated config, ordered by date then id.
pub fn milestones(cfg: &ConfigFile) -> Vec<Milestone> {
    let mut out: Vec<Milestone> = cfg
        .milestone
        .iter()
        .filter_map(|(id, m)| match parse_iso_date(&m.date) {
            Some(date) => Some(Milestone {
                id: id.clone(),
                label: m.label.clone(),
                date,
                warn_within_days: m.warn_within_days,
                alert_within_days: m.alert_within_days,
            }),
            None => {
                // Validation rejects these; only reachable via new_unchecked.
                warn!(milestone = %id, date = %m.date, "skipping milestone with invalid date");
                None
            }
        })
        .collect();

    out.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    out
}

/// Countdowns for every milestone, nearest first.
pub fn countdowns(cfg: &ConfigFile, today: NaiveDate) -> Vec<Countdown> {
    milestones(cfg)
        .iter()
        .map(|m| m.countdown(today))
        .collect()
}
