// src/clock.rs

//! Clock port, so "today" and update timestamps can be pinned in tests and
//! overridden from the command line.

use std::fmt::Debug;

use chrono::{DateTime, Local, NaiveDate, Utc};

pub trait Clock: Send + Sync + Debug {
    /// Current instant, used for `updated_at` stamps.
    fn now(&self) -> DateTime<Utc>;

    /// Reference day for date buckets.
    fn today(&self) -> NaiveDate;
}

/// Wall clock. "Today" is the local calendar day.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Midnight UTC on `day`.
    pub fn on(day: NaiveDate) -> Self {
        Self {
            now: day.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}
