// src/lib.rs

pub mod access;
pub mod analysis;
pub mod cli;
pub mod clock;
pub mod config;
pub mod dag;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod report;
pub mod schedule;
pub mod snapshot;
pub mod store;
pub mod types;

use anyhow::Result;
use tracing::{debug, info};

use crate::access::Viewer;
use crate::analysis::{Analysis, TaskFilter};
use crate::cli::{AddArgs, CliArgs, Command, FilterArgs, UpdateArgs};
use crate::clock::{Clock, SystemClock};
use crate::errors::FieldplanError;
use crate::fs::RealFileSystem;
use crate::snapshot::Snapshot;
use crate::store::{NewTask, TaskStore, TaskUpdate, TomlStore};

/// High-level entry point used by `main.rs`.
///
/// Opens the TOML task store named by `--config`, runs the command and
/// prints its report on stdout.
pub fn run(args: CliArgs) -> Result<()> {
    let store = TomlStore::new(
        &args.config,
        Box::new(RealFileSystem),
        Box::new(SystemClock),
    );
    let output = execute(&args, &store, &SystemClock)?;
    print!("{output}");
    Ok(())
}

/// Run one command against `store` and return the rendered report.
///
/// `clock` only supplies the reference day when `--today` is absent; the
/// store stamps updates with its own clock.
pub fn execute(args: &CliArgs, store: &dyn TaskStore, clock: &dyn Clock) -> Result<String> {
    let cfg = store.load()?;
    let snapshot = Snapshot::from_config(&cfg);
    let today = args.today.unwrap_or_else(|| clock.today());
    let viewer = Viewer::resolve(args.user.as_deref(), &cfg)?;

    debug!(?viewer, %today, command = ?args.command, "dispatching command");

    let analysis = Analysis::new(&snapshot, today);

    let output = match &args.command {
        Command::Summary => {
            let filter = viewer.scope(TaskFilter::any())?;
            report::render_summary(&analysis, &cfg, &filter)
        }
        Command::List(filter_args) => {
            let filter = viewer.scope(filter_from_args(filter_args))?;
            report::render_list(&analysis, &filter)
        }
        Command::Blocked => {
            let filter = viewer.scope(TaskFilter::any())?;
            report::render_blocked(&analysis, &filter)
        }
        Command::Critical { min } => {
            let filter = viewer.scope(TaskFilter::any())?;
            let min = min.unwrap_or(cfg.config.critical_min_dependents);
            report::render_critical(&analysis, min, &filter)
        }
        Command::Cascade { task: Some(id), .. } => {
            if let Some(task) = snapshot.get(id) {
                if !viewer.can_see(task) {
                    return Err(FieldplanError::PermissionDenied(format!(
                        "task '{id}' is not in your view"
                    ))
                    .into());
                }
            }
            report::render_cascade_for(&analysis, id)
        }
        Command::Cascade { task: None, top } => {
            let filter = viewer.scope(TaskFilter::any())?;
            let top = top.unwrap_or(cfg.config.top_cascade);
            report::render_cascade_ranking(&analysis, top, &filter)
        }
        Command::Today => {
            let filter = viewer.scope(TaskFilter::any())?;
            report::render_day_panel(&analysis, &filter)
        }
        Command::Check => report::render_check(&snapshot),
        Command::Update(update_args) => {
            apply_update(store, &snapshot, &viewer, update_args)?;
            format!("updated {}\n", update_args.id)
        }
        Command::Add(add_args) => {
            add_task(store, &viewer, add_args)?;
            format!("added {}\n", add_args.id)
        }
    };

    Ok(output)
}

fn filter_from_args(args: &FilterArgs) -> TaskFilter {
    TaskFilter {
        assignee: args.assignee.clone(),
        category: args.category.clone(),
        status: args.status.clone(),
        priority: args.priority,
    }
}

fn apply_update(
    store: &dyn TaskStore,
    snapshot: &Snapshot,
    viewer: &Viewer,
    args: &UpdateArgs,
) -> Result<()> {
    let task = snapshot
        .get(&args.id)
        .ok_or_else(|| FieldplanError::TaskNotFound(args.id.clone()))?;

    let update = TaskUpdate {
        status: args.status.clone(),
        assignee: args.assignee.clone(),
        target_date: args.target_date,
        priority: args.priority,
        notes: args.notes.clone(),
    };

    viewer.authorize_update(task, &update)?;
    store.update_task(&args.id, &update)?;

    info!(task = %args.id, user = ?viewer.user_id(), "task updated from cli");
    Ok(())
}

fn add_task(store: &dyn TaskStore, viewer: &Viewer, args: &AddArgs) -> Result<()> {
    viewer.authorize_create()?;

    let task = NewTask {
        title: args.title.clone(),
        status: args.status.clone().unwrap_or_default(),
        category: args.category.clone(),
        assignee: args.assignee.clone(),
        target_date: args.target_date,
        priority: args.priority,
        dependencies: args.dependencies.clone(),
        notes: args.notes.clone(),
    };
    store.create_task(&args.id, &task)?;

    info!(task = %args.id, user = ?viewer.user_id(), "task added from cli");
    Ok(())
}
