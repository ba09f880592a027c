// src/report.rs

//! Plain-text rendering of analysis results for the CLI.
//!
//! Each function returns a `String` so the output can be asserted on
//! without capturing stdout.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::analysis::{Analysis, TaskFilter, UNASSIGNED};
use crate::config::model::ConfigFile;
use crate::dag::{dangling_references, find_cycles};
use crate::schedule::{Bucket, CountdownLevel, countdowns};
use crate::snapshot::{Snapshot, Task};
use crate::types::TaskId;

/// Longest title shown in single-line listings.
const TITLE_WIDTH: usize = 40;

/// How many affected tasks a cascade row names before eliding.
const CASCADE_PREVIEW: usize = 5;

fn short(title: &str, width: usize) -> String {
    if title.chars().count() <= width {
        title.to_string()
    } else {
        let cut: String = title.chars().take(width).collect();
        format!("{cut}...")
    }
}

/// Title of a referenced task, or the raw id when it is not in the snapshot.
fn title_of(snapshot: &Snapshot, id: &str) -> String {
    snapshot
        .get(id)
        .map(|t| short(&t.title, 30))
        .unwrap_or_else(|| id.to_string())
}

fn task_line(analysis: &Analysis<'_>, task: &Task) -> String {
    let dir = analysis.snapshot().directory();
    let mut line = format!(
        "{:<8} {:<width$} [{}]",
        task.id,
        short(&task.title, TITLE_WIDTH),
        dir.status_name(&task.status),
        width = TITLE_WIDTH + 3,
    );
    if let Some(priority) = task.priority {
        let _ = write!(line, " {priority}");
    }
    if let Some(ref raw) = task.target_date {
        let _ = write!(line, " due {raw}");
    }
    if let Some(ref assignee) = task.assignee {
        let _ = write!(line, " @{}", dir.member_name(assignee));
    }
    line
}

pub fn render_summary(analysis: &Analysis<'_>, cfg: &ConfigFile, filter: &TaskFilter) -> String {
    let dir = analysis.snapshot().directory();
    let today = analysis.today();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} ({})",
        cfg.project.name.as_deref().unwrap_or("fieldplan"),
        cfg.project.site.as_deref().unwrap_or("no site"),
    );
    let _ = writeln!(out, "today: {today}");
    let _ = writeln!(out);

    let countdowns = countdowns(cfg, today);
    if !countdowns.is_empty() {
        let _ = writeln!(out, "milestones:");
        for c in countdowns {
            let marker = match c.level {
                CountdownLevel::Alert => "!!",
                CountdownLevel::Warning => "! ",
                CountdownLevel::Clear => "  ",
            };
            let _ = writeln!(
                out,
                "  {marker} {:<28} {} ({} days)",
                c.milestone.label, c.milestone.date, c.days_remaining
            );
        }
        let _ = writeln!(out);
    }

    let kpis = analysis.kpis(filter);
    let _ = writeln!(out, "tasks: {}", kpis.total);
    let _ = writeln!(
        out,
        "  not started {} | in progress {} | review {} | blocked {} | done {} | other {}",
        kpis.not_started, kpis.in_progress, kpis.review, kpis.blocked, kpis.done, kpis.other
    );
    let buckets = analysis.buckets();
    let visible = |ids: &BTreeSet<TaskId>| {
        ids.iter()
            .filter_map(|id| analysis.snapshot().get(id))
            .filter(|t| filter.matches(t))
            .count()
    };
    let _ = writeln!(
        out,
        "  overdue {} | due today {} | due tomorrow {}",
        kpis.overdue,
        visible(&buckets.due_today),
        visible(&buckets.due_tomorrow),
    );
    let _ = writeln!(out);

    let progress = analysis.category_progress(filter);
    if !progress.is_empty() {
        let _ = writeln!(out, "categories:");
        for p in progress {
            let _ = writeln!(
                out,
                "  {} {:<28} {}/{} done ({}%) {}",
                p.health.symbol(),
                dir.category_label(&p.category),
                p.done,
                p.total,
                p.percent_done(),
                p.health.label(),
            );
        }
        let _ = writeln!(out);
    }

    let urgent = analysis.urgent_tasks(filter);
    if urgent.is_empty() {
        let _ = writeln!(out, "no urgent tasks");
    } else {
        let _ = writeln!(out, "urgent (overdue, due today, or flagged urgent):");
        for u in urgent {
            let when = match u.days_overdue {
                0 if u.due == today => "due today".to_string(),
                0 => format!("flagged urgent, due {}", u.due),
                n => format!("{n} days late"),
            };
            let _ = writeln!(out, "  {} ({when})", task_line(analysis, u.task));
        }
    }

    out
}

pub fn render_list(analysis: &Analysis<'_>, filter: &TaskFilter) -> String {
    let mut out = String::new();
    let mut tasks: Vec<&Task> = analysis.tasks_matching(filter).collect();
    // Earliest date first; undated tasks at the end.
    tasks.sort_by(|a, b| {
        let (da, db) = (a.due_date(), b.due_date());
        da.is_none()
            .cmp(&db.is_none())
            .then_with(|| da.cmp(&db))
            .then_with(|| a.id.cmp(&b.id))
    });

    let _ = writeln!(out, "{} tasks", tasks.len());
    for task in tasks {
        let mut line = task_line(analysis, task);
        let pending = analysis.blocked_by(&task.id);
        if !task.is_done() && !pending.is_empty() {
            let _ = write!(line, " (blocked by {})", pending.join(", "));
        }
        let _ = writeln!(out, "  {line}");
    }
    out
}

pub fn render_blocked(analysis: &Analysis<'_>, filter: &TaskFilter) -> String {
    let snapshot = analysis.snapshot();
    let dir = snapshot.directory();
    let alerts = analysis.blocked_alerts(filter);
    let mut out = String::new();

    if alerts.is_empty() {
        let _ = writeln!(out, "all dependencies satisfied");
        return out;
    }

    let _ = writeln!(out, "{} tasks have unsatisfied dependencies", alerts.len());
    for alert in alerts {
        let _ = writeln!(out, "  {}", task_line(analysis, alert.task));
        for dep in alert.pending {
            match snapshot.get(dep) {
                Some(t) => {
                    let _ = writeln!(
                        out,
                        "      waits on {} {} [{}]",
                        dep,
                        short(&t.title, 30),
                        dir.status_name(&t.status)
                    );
                }
                None => {
                    let _ = writeln!(out, "      waits on {dep} (not in store)");
                }
            }
        }
    }
    out
}

pub fn render_critical(analysis: &Analysis<'_>, min_dependents: usize, filter: &TaskFilter) -> String {
    let snapshot = analysis.snapshot();
    let critical = analysis.critical_tasks(min_dependents, filter);
    let mut out = String::new();

    if critical.is_empty() {
        let _ = writeln!(out, "no open task blocks {min_dependents} or more tasks");
        return out;
    }

    let _ = writeln!(out, "tasks blocking {min_dependents}+ tasks:");
    for c in critical {
        let names: Vec<String> = c.dependents.iter().map(|id| title_of(snapshot, id)).collect();
        let _ = writeln!(
            out,
            "  {:>3}  {}\n       -> {}",
            c.dependents.len(),
            task_line(analysis, c.task),
            names.join(" | ")
        );
    }
    out
}

pub fn render_cascade_ranking(analysis: &Analysis<'_>, top: usize, filter: &TaskFilter) -> String {
    let snapshot = analysis.snapshot();
    let entries = analysis.top_cascade(top, filter);
    let mut out = String::new();

    if entries.is_empty() {
        let _ = writeln!(out, "no task has downstream dependents");
        return out;
    }

    let _ = writeln!(out, "top {} by cascade impact:", entries.len());
    for e in entries {
        let mut names: Vec<String> = e
            .affected
            .iter()
            .take(CASCADE_PREVIEW)
            .map(|id| title_of(snapshot, id))
            .collect();
        if e.affected.len() > CASCADE_PREVIEW {
            names.push("...".to_string());
        }
        let _ = writeln!(
            out,
            "  {:>3}  {}\n       -> {}",
            e.affected.len(),
            task_line(analysis, e.task),
            names.join(" | ")
        );
    }
    out
}

/// Cascade for a single task. Works for ids outside the snapshot too.
pub fn render_cascade_for(analysis: &Analysis<'_>, id: &str) -> String {
    let snapshot = analysis.snapshot();
    let affected = analysis.cascade(id);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "if {} ({}) slips, {} tasks are affected",
        id,
        title_of(snapshot, id),
        affected.len()
    );
    for dep in &affected {
        let direct = if analysis.blocks(id).contains(dep) {
            "direct"
        } else {
            "indirect"
        };
        let _ = writeln!(out, "  {:<8} {:<8} {}", dep, direct, title_of(snapshot, dep));
    }
    out
}

pub fn render_day_panel(analysis: &Analysis<'_>, filter: &TaskFilter) -> String {
    let snapshot = analysis.snapshot();
    let dir = snapshot.directory();
    let mut out = String::new();

    for (bucket, heading) in [
        (Bucket::Overdue, "overdue"),
        (Bucket::DueToday, "due today"),
        (Bucket::DueTomorrow, "due tomorrow"),
    ] {
        let panel = analysis.day_panel(bucket, filter);
        let count: usize = panel.values().map(Vec::len).sum();
        let _ = writeln!(out, "{heading} ({count})");
        if panel.is_empty() {
            let _ = writeln!(out, "  nothing {heading}");
        }
        for (assignee, tasks) in panel {
            let who = if assignee == UNASSIGNED {
                UNASSIGNED
            } else {
                dir.member_name(&assignee)
            };
            let _ = writeln!(out, "  {who}");
            for task in tasks {
                let _ = writeln!(out, "    {}", task_line(analysis, task));
                let pending = analysis.blocked_by(&task.id);
                if !pending.is_empty() {
                    let names: Vec<String> =
                        pending.iter().map(|d| title_of(snapshot, d)).collect();
                    let _ = writeln!(out, "      blocked by: {}", names.join(", "));
                }
                if let Some(ref notes) = task.notes {
                    let _ = writeln!(out, "      note: {notes}");
                }
            }
        }
        let _ = writeln!(out);
    }
    out
}

/// Data-quality report: cycles and dangling references.
pub fn render_check(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let cycles = find_cycles(snapshot);
    let dangling = dangling_references(snapshot);

    let _ = writeln!(out, "{} tasks loaded", snapshot.len());

    if cycles.is_empty() {
        let _ = writeln!(out, "no dependency cycles");
    } else {
        let _ = writeln!(out, "{} dependency cycles (these tasks can never unblock):", cycles.len());
        for cycle in cycles {
            let _ = writeln!(out, "  {}", cycle.join(", "));
        }
    }

    if dangling.is_empty() {
        let _ = writeln!(out, "no dangling dependencies");
    } else {
        let _ = writeln!(
            out,
            "{} dependencies point at missing tasks (treated as unsatisfied):",
            dangling.len()
        );
        for d in dangling {
            let _ = writeln!(out, "  {} -> {}", d.task, d.missing);
        }
    }
    out
}
