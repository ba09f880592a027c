// src/schedule/mod.rs

//! Date-based state derivation.
//!
//! - [`temporal`] buckets tasks into overdue / due today / due tomorrow.
//! - [`milestones`] computes countdowns to project milestones.

pub mod milestones;
pub mod temporal;

use chrono::NaiveDate;

pub use milestones::{Countdown, CountdownLevel, Milestone, countdowns};
pub use temporal::{
    Bucket, TemporalBuckets, bucket_for, classify_temporal, days_overdue, task_days_overdue,
};

/// The one date format shared with the task store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date; `None` on anything else.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}
