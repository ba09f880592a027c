// src/config/mod.rs

//! Task store file format, loading and validation.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a file from disk (`loader.rs`).
//! - Validate settings, milestones and access lists (`validate.rs`).
//!
//! Task records are deliberately *not* rejected for bad data: malformed
//! dates, dangling dependencies and cycles are all tolerated downstream.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{
    CategoryConfig, ConfigFile, ConfigSection, MemberConfig, MilestoneConfig, ProjectSection,
    RawConfigFile, StatusConfig, TaskConfig,
};
