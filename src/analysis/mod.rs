// src/analysis/mod.rs

//! Read-only queries over one snapshot and reference day.
//!
//! [`Analysis`] computes the dependency graph and date buckets once and then
//! answers every dashboard question from them:
//!
//! - [`queries`]: blocked alerts, critical chains, cascade ranking, urgent
//!   tasks, day panel.
//! - [`aggregate`]: counts per status / category / assignee and headline KPIs.
//! - [`health`]: per-category traffic light.
//! - [`filter`]: the conjunctive [`TaskFilter`] every query accepts.

pub mod aggregate;
pub mod filter;
pub mod health;
pub mod queries;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::dag::{DependencyGraph, cascade_impact};
use crate::schedule::{TemporalBuckets, classify_temporal};
use crate::snapshot::Snapshot;
use crate::types::TaskId;

pub use aggregate::{Kpis, UNASSIGNED, UNCATEGORISED};
pub use filter::TaskFilter;
pub use health::{CategoryHealth, CategoryProgress};
pub use queries::{BlockedAlert, CascadeEntry, CriticalTask, UrgentTask};

/// One analysis pass: a snapshot, a reference day and everything derived
/// from them.
#[derive(Debug, Clone)]
pub struct Analysis<'a> {
    snapshot: &'a Snapshot,
    today: NaiveDate,
    graph: DependencyGraph,
    buckets: TemporalBuckets,
}

impl<'a> Analysis<'a> {
    pub fn new(snapshot: &'a Snapshot, today: NaiveDate) -> Self {
        let graph = DependencyGraph::build(snapshot);
        let buckets = classify_temporal(snapshot.tasks(), today);

        debug!(tasks = snapshot.len(), %today, "analysis pass ready");

        Self {
            snapshot,
            today,
            graph,
            buckets,
        }
    }

    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn buckets(&self) -> &TemporalBuckets {
        &self.buckets
    }

    /// Tasks transitively affected if `id` slips.
    pub fn cascade(&self, id: &str) -> BTreeSet<TaskId> {
        cascade_impact(id, self.graph.blocks_map())
    }
}
