//! Task data structure.
//!
//! This module defines the core `Task` struct representing a single study
//! task with its subject, priority, deadline and estimated duration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::Priority;

/// A study task with scheduling metadata and a completion flag.
///
/// `duration` is kept as the text the user entered (estimated minutes);
/// it is parsed to an integer only when the dashboard aggregates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub subject: String,
    pub priority: Priority,
    pub deadline: NaiveDate,
    pub duration: String,
    pub completed: bool,
}

impl Task {
    /// Estimated duration in minutes, if the stored text parses.
    pub fn duration_minutes(&self) -> Option<u64> {
        self.duration.trim().parse().ok()
    }
}
