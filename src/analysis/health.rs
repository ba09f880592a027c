// src/analysis/health.rs

//! Per-category traffic light.

use std::collections::BTreeMap;

use crate::analysis::aggregate::UNCATEGORISED;
use crate::analysis::{Analysis, TaskFilter};

/// Traffic-light state of a category.
///
/// Any overdue task wins over completion. Otherwise the completion ratio
/// picks one of three tiers: at least 70% done, at least 30% done, or less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CategoryHealth {
    Overdue,
    OnTrack,
    Progressing,
    Lagging,
}

impl CategoryHealth {
    pub fn from_counts(done: usize, total: usize, overdue: usize) -> Self {
        if overdue > 0 {
            CategoryHealth::Overdue
        } else if done * 10 >= total * 7 && total > 0 {
            CategoryHealth::OnTrack
        } else if done * 10 >= total * 3 && total > 0 {
            CategoryHealth::Progressing
        } else {
            CategoryHealth::Lagging
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CategoryHealth::Overdue => "🔴",
            CategoryHealth::OnTrack => "🟢",
            CategoryHealth::Progressing => "🟡",
            CategoryHealth::Lagging => "🟠",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryHealth::Overdue => "overdue",
            CategoryHealth::OnTrack => "on track",
            CategoryHealth::Progressing => "progressing",
            CategoryHealth::Lagging => "lagging",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryProgress {
    pub category: String,
    pub total: usize,
    pub done: usize,
    pub overdue: usize,
    pub health: CategoryHealth,
}

impl CategoryProgress {
    /// Completion in percent, rounded down.
    pub fn percent_done(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.done * 100 / self.total
        }
    }
}

impl<'a> Analysis<'a> {
    /// Progress of every category that has at least one matching task, in
    /// category id order.
    pub fn category_progress(&self, filter: &TaskFilter) -> Vec<CategoryProgress> {
        // (total, done, overdue)
        let mut tally: BTreeMap<&str, (usize, usize, usize)> = BTreeMap::new();

        for task in self.tasks_matching(filter) {
            let key = task.category.as_deref().unwrap_or(UNCATEGORISED);
            let entry = tally.entry(key).or_default();
            entry.0 += 1;
            if task.is_done() {
                entry.1 += 1;
            }
            if self.buckets.is_overdue(&task.id) {
                entry.2 += 1;
            }
        }

        tally
            .into_iter()
            .map(|(category, (total, done, overdue))| CategoryProgress {
                category: category.to_string(),
                total,
                done,
                overdue,
                health: CategoryHealth::from_counts(done, total, overdue),
            })
            .collect()
    }
}
