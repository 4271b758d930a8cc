//! Enumerations and field types for task management.
//!
//! This module defines the structured data types used to categorise tasks:
//! priority levels and the filter modes that control which tasks are visible.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    #[serde(alias = "High")]
    High,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "Low")]
    Low,
}

/// Visibility filter for task lists.
///
/// A closed set: every task is either pending or completed, and `All`
/// shows both, so each task appears under exactly one of the two
/// non-`All` modes.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    All,
    Pending,
    Completed,
}

impl FilterMode {
    /// Cycle to the next mode (used by the TUI filter toggle).
    pub fn next(self) -> Self {
        match self {
            FilterMode::All => FilterMode::Pending,
            FilterMode::Pending => FilterMode::Completed,
            FilterMode::Completed => FilterMode::All,
        }
    }
}
