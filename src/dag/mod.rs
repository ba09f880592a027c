// src/dag/mod.rs

//! Dependency graph over a task snapshot.
//!
//! - [`graph`] builds the "blocked by" and "blocks" adjacency.
//! - [`cascade`] walks "blocks" edges transitively.
//! - [`cycles`] reports cycles and dangling references in the raw data.

pub mod cascade;
pub mod cycles;
pub mod graph;

pub use cascade::cascade_impact;
pub use cycles::{DanglingReference, dangling_references, find_cycles};
pub use graph::{BlockedBy, Blocks, DependencyGraph, build_graph, is_satisfied};
