// src/dag/cycles.rs

//! Data-quality diagnostics over the dependency relation.
//!
//! Cycles and dangling references are legal input; these helpers only find
//! them so they can be reported.

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;

use crate::snapshot::Snapshot;
use crate::types::TaskId;

/// A dependency that points at an id missing from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DanglingReference {
    pub task: TaskId,
    pub missing: TaskId,
}

/// Dependency cycles in a snapshot, each as a sorted list of task ids.
pub fn find_cycles(snapshot: &Snapshot) -> Vec<Vec<TaskId>> {
    find_cycles_in(snapshot.tasks().map(|t| {
        (
            t.id.as_str(),
            t.dependencies.iter().map(String::as_str),
        )
    }))
}

/// Dependency cycles over raw `(task, dependencies)` pairs.
///
/// Every strongly connected component with more than one task is a cycle, as
/// is a task that lists itself. Output is sorted for stable reporting.
pub fn find_cycles_in<'a, I, D>(tasks: I) -> Vec<Vec<TaskId>>
where
    I: IntoIterator<Item = (&'a str, D)>,
    D: IntoIterator<Item = &'a str>,
{
    // Edge direction: dep -> task. Dangling deps become sink-less source
    // nodes and can never be part of a component with more than one node.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for (task, deps) in tasks {
        graph.add_node(task);
        for dep in deps {
            graph.add_edge(dep, task, ());
        }
    }

    let mut cycles: Vec<Vec<TaskId>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|node| graph.contains_edge(*node, *node))
        })
        .map(|component| {
            let mut ids: Vec<TaskId> = component.into_iter().map(str::to_string).collect();
            ids.sort();
            ids
        })
        .collect();

    cycles.sort();
    cycles
}

/// Dependencies that reference ids missing from the snapshot.
pub fn dangling_references(snapshot: &Snapshot) -> Vec<DanglingReference> {
    let mut dangling = Vec::new();
    for task in snapshot.tasks() {
        for dep in task.dependencies.iter() {
            if !snapshot.contains(dep) {
                dangling.push(DanglingReference {
                    task: task.id.clone(),
                    missing: dep.clone(),
                });
            }
        }
    }
    dangling
}
