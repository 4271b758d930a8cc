//! Task store and persistence.
//!
//! This module provides the `TaskStore` struct owning the ordered task
//! collection, its JSON persistence (single file, written wholesale on every
//! change), the filter view, and utility functions for deadline parsing and
//! table display.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fields::{FilterMode, Priority};
use crate::task::Task;

/// Current on-disk schema version, written with every save.
pub const SCHEMA_VERSION: u32 = 1;

fn default_version() -> u32 {
    SCHEMA_VERSION
}

/// Failure reading or writing the persisted store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse store file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Rejected task creation, with the first missing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("missing required field `{field}`")]
pub struct CreateError {
    pub field: &'static str,
}

/// In-memory store holding the ordered task collection.
///
/// The store is the sole source of truth during a session; the file on disk
/// holds a serialized copy, overwritten in full on every mutation.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskStore {
    #[serde(default = "default_version")]
    pub version: u32,
    pub tasks: Vec<Task>,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore {
            version: SCHEMA_VERSION,
            tasks: Vec::new(),
        }
    }
}

impl TaskStore {
    /// Load the store from a JSON file. A missing file is a first run and
    /// yields an empty store; an unreadable or unparseable file is an error
    /// surfaced to the caller.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Ok(TaskStore::default());
        }
        let mut buf = String::new();
        File::open(path)?.read_to_string(&mut buf)?;
        match serde_json::from_str::<TaskStore>(&buf) {
            Ok(store) => Ok(store),
            // Pre-versioning files held a bare task array; migrate on load.
            Err(primary) => match serde_json::from_str::<Vec<Task>>(&buf) {
                Ok(tasks) => Ok(TaskStore {
                    version: SCHEMA_VERSION,
                    tasks,
                }),
                Err(_) => Err(StoreError::Parse(primary)),
            },
        }
    }

    /// Save the store to a JSON file using atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    /// Generate the next task ID: milliseconds since epoch at creation time,
    /// bumped above any existing ID so same-millisecond creations stay unique.
    pub fn next_id(&self) -> u64 {
        let stamp = Utc::now().timestamp_millis().max(0) as u64;
        let floor = self.tasks.iter().map(|t| t.id + 1).max().unwrap_or(0);
        stamp.max(floor)
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a task by ID.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Create a task and append it to the collection.
    ///
    /// Presence checks only: the text fields must be non-blank. The rejection
    /// reason is returned explicitly; callers that want the classic silent
    /// no-op simply discard it.
    pub fn create(
        &mut self,
        title: &str,
        subject: &str,
        priority: Priority,
        deadline: NaiveDate,
        duration: &str,
    ) -> Result<&Task, CreateError> {
        for (field, value) in [
            ("title", title),
            ("subject", subject),
            ("duration", duration),
        ] {
            if value.trim().is_empty() {
                return Err(CreateError { field });
            }
        }
        let task = Task {
            id: self.next_id(),
            title: title.trim().to_string(),
            subject: subject.trim().to_string(),
            priority,
            deadline,
            duration: duration.trim().to_string(),
            completed: false,
        };
        let idx = self.tasks.len();
        self.tasks.push(task);
        Ok(&self.tasks[idx])
    }

    /// Remove the task with the given ID. Returns whether a task was removed;
    /// an unknown ID leaves the store unchanged.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() < before
    }

    /// Mark the task with the given ID completed. Returns whether a task was
    /// found. There is no reopen: completion is undone only by deletion.
    pub fn complete(&mut self, id: u64) -> bool {
        match self.get_mut(id) {
            Some(t) => {
                t.completed = true;
                true
            }
            None => false,
        }
    }

    /// Select the visible subset for a filter mode, preserving insertion
    /// order. Pure view over the collection.
    pub fn select(&self, mode: FilterMode) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| match mode {
                FilterMode::All => true,
                FilterMode::Pending => !t.completed,
                FilterMode::Completed => t.completed,
            })
            .collect()
    }

    /// Distinct subjects with task counts, in first-seen order.
    pub fn subjects(&self) -> Vec<(String, usize)> {
        let mut out: Vec<(String, usize)> = Vec::new();
        for t in &self.tasks {
            match out.iter_mut().find(|(s, _)| *s == t.subject) {
                Some((_, n)) => *n += 1,
                None => out.push((t.subject.clone(), 1)),
            }
        }
        out
    }
}

/// Parse human-readable deadline input.
///
/// Supports:
/// - "today", "tomorrow"
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD" format
pub fn parse_deadline_input(s: &str) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    let today = Local::now().date_naive();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        if let Some(nd) = rest.strip_suffix('d') {
            if let Ok(days) = nd.trim().parse::<i64>() {
                return Some(today + Duration::days(days));
            }
        }
        if let Some(nw) = rest.strip_suffix('w') {
            if let Ok(weeks) = nw.trim().parse::<i64>() {
                return Some(today + Duration::weeks(weeks));
            }
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Format a deadline relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_deadline_relative(deadline: NaiveDate, today: NaiveDate) -> String {
    let delta = (deadline - today).num_days();
    if delta == 0 {
        "today".into()
    } else if delta == 1 {
        "tomorrow".into()
    } else if delta > 1 {
        format!("in {}d", delta)
    } else {
        format!("{}d late", -delta)
    }
}

/// Format a priority level for display.
pub fn format_priority(p: Priority) -> &'static str {
    match p {
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    // Header.
    println!(
        "{:<15} {:<8} {:<10} {:<6} {:<9} {:<14} {}",
        "ID", "Status", "Deadline", "Pri", "Est (min)", "Subject", "Title"
    );
    let today = Local::now().date_naive();
    for t in tasks {
        let status = if t.completed { "done" } else { "pending" };
        println!(
            "{:<15} {:<8} {:<10} {:<6} {:<9} {:<14} {}",
            t.id,
            status,
            format_deadline_relative(t.deadline, today),
            format_priority(t.priority),
            t.duration,
            truncate(&t.subject, 14),
            t.title,
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_store() -> TaskStore {
        let mut store = TaskStore::default();
        store
            .create("Essay", "English", Priority::High, date("2025-01-10"), "60")
            .unwrap();
        store
            .create("Revision", "Maths", Priority::Low, date("2025-01-12"), "45")
            .unwrap();
        store
            .create("Lab report", "Physics", Priority::Medium, date("2025-01-11"), "90")
            .unwrap();
        store
    }

    #[test]
    fn test_create_assigns_distinct_ids() {
        let store = sample_store();
        assert_eq!(store.tasks.len(), 3);
        assert!(store.tasks[0].id < store.tasks[1].id);
        assert!(store.tasks[1].id < store.tasks[2].id);
        assert!(store.tasks.iter().all(|t| !t.completed));
    }

    #[test]
    fn test_create_rejects_blank_fields() {
        let mut store = TaskStore::default();
        let err = store
            .create("", "English", Priority::High, date("2025-01-10"), "60")
            .unwrap_err();
        assert_eq!(err.field, "title");
        let err = store
            .create("Essay", "English", Priority::High, date("2025-01-10"), "  ")
            .unwrap_err();
        assert_eq!(err.field, "duration");
        assert!(store.tasks.is_empty());
    }

    #[test]
    fn test_delete_known_and_unknown_id() {
        let mut store = sample_store();
        let id = store.tasks[1].id;
        assert!(store.delete(id));
        assert_eq!(store.tasks.len(), 2);
        assert!(store.get(id).is_none());
        // Unknown id is a no-op.
        assert!(!store.delete(id));
        assert_eq!(store.tasks.len(), 2);
    }

    #[test]
    fn test_complete_flips_flag_once() {
        let mut store = sample_store();
        let id = store.tasks[0].id;
        assert!(store.complete(id));
        assert!(store.get(id).unwrap().completed);
        assert!(!store.complete(9999));
    }

    #[test]
    fn test_select_partitions_store() {
        let mut store = sample_store();
        let done_id = store.tasks[2].id;
        store.complete(done_id);

        let all = store.select(FilterMode::All);
        let pending = store.select(FilterMode::Pending);
        let completed = store.select(FilterMode::Completed);

        assert_eq!(all.len(), 3);
        assert_eq!(pending.len(), 2);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, done_id);
        // Insertion order is preserved in every view.
        assert_eq!(pending[0].title, "Essay");
        assert_eq!(pending[1].title, "Revision");
        assert_eq!(pending.len() + completed.len(), all.len());
    }

    #[test]
    fn test_save_load_round_trip() {
        let store = sample_store();
        let path = std::env::temp_dir().join(format!(
            "focusflow-roundtrip-{}.json",
            std::process::id()
        ));
        store.save(&path).unwrap();
        let loaded = TaskStore::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.version, SCHEMA_VERSION);
        assert_eq!(loaded.tasks, store.tasks);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let path = std::env::temp_dir().join(format!(
            "focusflow-missing-{}.json",
            std::process::id()
        ));
        let store = TaskStore::load(&path).unwrap();
        assert!(store.tasks.is_empty());
    }

    #[test]
    fn test_load_legacy_unversioned_blob() {
        // Bare array with capitalised priorities, as older exports wrote it.
        let blob = r#"[{"id": 1736200000000, "title": "Essay", "subject": "English",
                        "priority": "High", "deadline": "2025-01-10",
                        "duration": "60", "completed": false}]"#;
        let path = std::env::temp_dir().join(format!(
            "focusflow-legacy-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, blob).unwrap();
        let store = TaskStore::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(store.version, SCHEMA_VERSION);
        assert_eq!(store.tasks.len(), 1);
        assert_eq!(store.tasks[0].priority, Priority::High);
        assert_eq!(store.tasks[0].duration, "60");
    }

    #[test]
    fn test_load_corrupt_blob_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "focusflow-corrupt-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{not json").unwrap();
        let result = TaskStore::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_parse_deadline_input() {
        let today = Local::now().date_naive();
        assert_eq!(parse_deadline_input("today"), Some(today));
        assert_eq!(
            parse_deadline_input("tomorrow"),
            Some(today + Duration::days(1))
        );
        assert_eq!(
            parse_deadline_input("in 3d"),
            Some(today + Duration::days(3))
        );
        assert_eq!(
            parse_deadline_input("in 2w"),
            Some(today + Duration::weeks(2))
        );
        assert_eq!(parse_deadline_input("2025-01-10"), Some(date("2025-01-10")));
        assert_eq!(parse_deadline_input("soonish"), None);
    }

    #[test]
    fn test_subjects_counts_first_seen_order() {
        let mut store = sample_store();
        store
            .create("Past paper", "Maths", Priority::High, date("2025-01-15"), "30")
            .unwrap();
        let subjects = store.subjects();
        assert_eq!(
            subjects,
            vec![
                ("English".to_string(), 1),
                ("Maths".to_string(), 2),
                ("Physics".to_string(), 1),
            ]
        );
    }
}
