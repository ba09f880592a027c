// src/snapshot/directory.rs

//! Lookup tables for display names.
//!
//! Every lookup falls back to the raw id when the entity is unknown, so a
//! task pointing at a deleted category or team member still renders.

use std::collections::BTreeMap;

use crate::config::model::ConfigFile;
use crate::types::Status;

#[derive(Debug, Clone, Default)]
pub struct Directory {
    members: BTreeMap<String, String>,
    statuses: BTreeMap<String, StatusEntry>,
    categories: BTreeMap<String, CategoryEntry>,
}

#[derive(Debug, Clone)]
struct StatusEntry {
    name: String,
    order: Option<u32>,
}

#[derive(Debug, Clone)]
struct CategoryEntry {
    name: String,
    icon: Option<String>,
}

impl Directory {
    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self {
            members: cfg
                .team
                .iter()
                .map(|(id, m)| (id.clone(), m.name.clone()))
                .collect(),
            statuses: cfg
                .status
                .iter()
                .map(|(id, s)| {
                    (
                        id.clone(),
                        StatusEntry {
                            name: s.name.clone(),
                            order: s.order,
                        },
                    )
                })
                .collect(),
            categories: cfg
                .category
                .iter()
                .map(|(id, c)| {
                    (
                        id.clone(),
                        CategoryEntry {
                            name: c.name.clone(),
                            icon: c.icon.clone(),
                        },
                    )
                })
                .collect(),
        }
    }

    pub fn member_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.members.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn status_name<'a>(&'a self, status: &'a Status) -> &'a str {
        let id = status.as_str();
        self.statuses.get(id).map(|s| s.name.as_str()).unwrap_or(id)
    }

    /// Board column order of a status; unknown statuses sort last.
    pub fn status_order(&self, status: &Status) -> u32 {
        self.statuses
            .get(status.as_str())
            .and_then(|s| s.order)
            .unwrap_or(u32::MAX)
    }

    /// Category name prefixed with its icon when one is configured.
    pub fn category_label(&self, id: &str) -> String {
        match self.categories.get(id) {
            Some(CategoryEntry {
                name,
                icon: Some(icon),
            }) => format!("{icon} {name}"),
            Some(entry) => entry.name.clone(),
            None => id.to_string(),
        }
    }
}
