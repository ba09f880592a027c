// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::default_config_path;
use crate::schedule::parse_iso_date;
use crate::types::{Priority, Status};

/// Command-line arguments for `fieldplan`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fieldplan",
    version,
    about = "Dependency and schedule analysis for a project task board.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the task store (TOML).
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Reference day for date buckets (YYYY-MM-DD). Defaults to the local date.
    #[arg(long, value_name = "DATE", value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,

    /// Team member id to act as. Omit for the anonymous read-only view.
    #[arg(long, value_name = "ID")]
    pub user: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FIELDPLAN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Headline numbers, milestones, category health and urgent tasks.
    Summary,

    /// List tasks, optionally filtered.
    List(FilterArgs),

    /// Open tasks waiting on unfinished dependencies.
    Blocked,

    /// Open tasks that many other tasks depend on directly.
    Critical {
        /// Minimum number of direct dependents. Defaults to `[config]`.
        #[arg(long, value_name = "N", value_parser = parse_count_arg)]
        min: Option<usize>,
    },

    /// Tasks that slip if a task slips. Without TASK, rank the worst offenders.
    Cascade {
        task: Option<String>,

        /// How many tasks to rank. Defaults to `[config]`.
        #[arg(long, value_name = "N", value_parser = parse_count_arg)]
        top: Option<usize>,
    },

    /// Overdue, due today and due tomorrow, grouped by assignee.
    Today,

    /// Report dependency cycles and references to missing tasks.
    Check,

    /// Change a task's mutable fields.
    Update(UpdateArgs),

    /// Add a new task. Admins only.
    Add(AddArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    #[arg(long, value_parser = parse_status_arg)]
    pub status: Option<Status>,

    #[arg(long, value_name = "ID")]
    pub category: Option<String>,

    #[arg(long, value_name = "ID")]
    pub assignee: Option<String>,

    #[arg(long, value_parser = parse_priority_arg)]
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long, value_parser = parse_status_arg)]
    pub status: Option<Status>,

    #[arg(long, value_name = "ID")]
    pub assignee: Option<String>,

    #[arg(long, value_name = "DATE", value_parser = parse_date_arg)]
    pub target_date: Option<NaiveDate>,

    #[arg(long, value_parser = parse_priority_arg)]
    pub priority: Option<Priority>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    pub id: String,

    #[arg(long)]
    pub title: String,

    #[arg(long, value_parser = parse_status_arg)]
    pub status: Option<Status>,

    #[arg(long, value_name = "ID")]
    pub category: Option<String>,

    #[arg(long, value_name = "ID")]
    pub assignee: Option<String>,

    #[arg(long, value_name = "DATE", value_parser = parse_date_arg)]
    pub target_date: Option<NaiveDate>,

    #[arg(long, value_parser = parse_priority_arg)]
    pub priority: Option<Priority>,

    /// Prerequisite task id. Repeat for several.
    #[arg(long = "after", value_name = "ID")]
    pub dependencies: Vec<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_iso_date(raw).ok_or_else(|| format!("'{raw}' is not a YYYY-MM-DD date"))
}

fn parse_count_arg(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("'{raw}' is not a count: {e}")),
    }
}

fn parse_status_arg(raw: &str) -> Result<Status, String> {
    raw.parse()
}

fn parse_priority_arg(raw: &str) -> Result<Priority, String> {
    raw.parse()
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
