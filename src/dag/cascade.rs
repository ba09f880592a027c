// src/dag/cascade.rs

//! Transitive "who is affected if this task slips" computation.

use std::collections::BTreeSet;

use crate::dag::graph::Blocks;
use crate::types::TaskId;

/// All tasks reachable from `task` by following `blocks` edges.
///
/// Uses an explicit stack and a visited set, so it terminates on cyclic data
/// and never grows the call stack. The starting task only shows up in the
/// result if some cycle leads back to it.
pub fn cascade_impact(task: &str, blocks: &Blocks) -> BTreeSet<TaskId> {
    let mut affected: BTreeSet<TaskId> = BTreeSet::new();
    let mut stack: Vec<&TaskId> = match blocks.get(task) {
        Some(direct) => direct.iter().collect(),
        None => return affected,
    };

    while let Some(id) = stack.pop() {
        if !affected.insert(id.clone()) {
            continue;
        }
        if let Some(next) = blocks.get(id) {
            stack.extend(next.iter().filter(|n| !affected.contains(*n)));
        }
    }

    affected
}
