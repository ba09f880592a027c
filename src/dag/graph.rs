// src/dag/graph.rs

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::snapshot::{Snapshot, Task};
use crate::types::TaskId;

/// task id -> declared dependencies that are not yet satisfied, in declared
/// order.
pub type BlockedBy = BTreeMap<TaskId, Vec<TaskId>>;

/// task id -> tasks that list it as a dependency.
pub type Blocks = BTreeMap<TaskId, BTreeSet<TaskId>>;

static NO_DEPENDENTS: BTreeSet<TaskId> = BTreeSet::new();

/// Forward ("blocked by") and reverse ("blocks") adjacency over one snapshot.
///
/// Unlike a scheduler DAG this makes no acyclicity or completeness
/// assumptions: dependencies may point outside the snapshot and may form
/// cycles.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    blocked_by: BlockedBy,
    blocks: Blocks,
}

impl DependencyGraph {
    pub fn build(snapshot: &Snapshot) -> Self {
        let (blocked_by, blocks) = build_graph(snapshot);
        Self { blocked_by, blocks }
    }

    /// Unsatisfied dependencies of a task. Empty for unknown ids.
    pub fn blocked_by(&self, id: &str) -> &[TaskId] {
        self.blocked_by
            .get(id)
            .map(|deps| deps.as_slice())
            .unwrap_or(&[])
    }

    /// Direct dependents of a task. Empty for unknown ids.
    pub fn blocks(&self, id: &str) -> &BTreeSet<TaskId> {
        self.blocks.get(id).unwrap_or(&NO_DEPENDENTS)
    }

    pub fn is_blocked(&self, id: &str) -> bool {
        !self.blocked_by(id).is_empty()
    }

    pub fn blocks_map(&self) -> &Blocks {
        &self.blocks
    }
}

/// Whether `dep` counts as satisfied for a task in `snapshot`.
///
/// Only a dependency that exists *and* is done is satisfied; an id missing
/// from the snapshot is of unknown state and therefore still blocking.
pub fn is_satisfied(snapshot: &Snapshot, dep: &str) -> bool {
    snapshot.get(dep).is_some_and(Task::is_done)
}

/// Build `(blocked_by, blocks)` for every task in the snapshot.
///
/// - `blocked_by` has one entry per task (possibly empty).
/// - `blocks` is the inverse of the *full* dependency relation, including
///   edges from dependencies that are already done or missing.
pub fn build_graph(snapshot: &Snapshot) -> (BlockedBy, Blocks) {
    let mut blocked_by = BlockedBy::new();
    let mut blocks = Blocks::new();

    for task in snapshot.tasks() {
        let pending: Vec<TaskId> = task
            .dependencies
            .iter()
            .filter(|dep| !is_satisfied(snapshot, dep))
            .cloned()
            .collect();

        if !pending.is_empty() {
            trace!(task = %task.id, ?pending, "task has unsatisfied dependencies");
        }
        blocked_by.insert(task.id.clone(), pending);

        for dep in task.dependencies.iter() {
            blocks
                .entry(dep.clone())
                .or_default()
                .insert(task.id.clone());
        }
    }

    debug!(
        tasks = snapshot.len(),
        blocked = blocked_by.values().filter(|deps| !deps.is_empty()).count(),
        "built dependency graph"
    );

    (blocked_by, blocks)
}
