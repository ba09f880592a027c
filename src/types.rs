// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Task identifier as it appears in the task store (the `[task.<id>]` key).
pub type TaskId = String;

/// Workflow state of a task.
///
/// The well-known states get their own variants; anything else coming from the
/// store is kept verbatim in `Other` so that extra workflow columns survive a
/// load/save cycle. Only `Done` has special meaning for the analysis: a task is
/// complete iff its status is `Done`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    NotStarted,
    InProgress,
    Review,
    Blocked,
    Done,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::NotStarted => "not_started",
            Status::InProgress => "in_progress",
            Status::Review => "review",
            Status::Blocked => "blocked",
            Status::Done => "done",
            Status::Other(s) => s.as_str(),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Status::Done)
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::NotStarted
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "not_started" => Status::NotStarted,
            "in_progress" => Status::InProgress,
            "review" => Status::Review,
            "blocked" => Status::Blocked,
            "done" => Status::Done,
            _ => Status::Other(s),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err("status must not be empty".to_string());
        }
        Ok(Status::from(s.to_string()))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority. Declared from most to least pressing, so `Ord` sorts
/// `Urgent` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "urgent" => Ok(Priority::Urgent),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!(
                "invalid priority: {other} (expected \"urgent\", \"high\", \"medium\" or \"low\")"
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
