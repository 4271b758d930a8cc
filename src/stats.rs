//! Dashboard statistics derived from the task collection.
//!
//! Stateless aggregation: every metric is recomputed from scratch over the
//! full (unfiltered) task snapshot whenever the store changes.

use chrono::{NaiveDateTime, NaiveTime};

use crate::fields::Priority;
use crate::task::Task;

/// Deadlines within this many days of now count as "due soon".
pub const DUE_SOON_DAYS: f64 = 3.0;

/// Aggregate metrics over the full task collection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Dashboard {
    pub pending: usize,
    pub completed: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub due_soon: usize,
    pub total_pending_minutes: u64,
    /// Pending tasks whose duration text did not parse as minutes. These are
    /// excluded from `total_pending_minutes`; callers decide how to report.
    pub malformed_durations: usize,
}

impl Dashboard {
    /// Compute the dashboard for a task snapshot at the given wall-clock time.
    ///
    /// The due-soon window measures fractional days from `now` to midnight at
    /// the start of the deadline date, bounded inclusively in
    /// [0, `DUE_SOON_DAYS`]. A deadline of today therefore stops counting the
    /// moment its midnight has passed; kept as the established behaviour.
    pub fn compute(tasks: &[Task], now: NaiveDateTime) -> Self {
        let mut dash = Dashboard::default();
        for t in tasks {
            if t.completed {
                dash.completed += 1;
            } else {
                dash.pending += 1;
                match t.duration_minutes() {
                    Some(minutes) => dash.total_pending_minutes += minutes,
                    None => dash.malformed_durations += 1,
                }
                let midnight = t.deadline.and_time(NaiveTime::MIN);
                let diff_days = (midnight - now).num_seconds() as f64 / 86_400.0;
                if (0.0..=DUE_SOON_DAYS).contains(&diff_days) {
                    dash.due_soon += 1;
                }
            }
            match t.priority {
                Priority::High => dash.high += 1,
                Priority::Medium => dash.medium += 1,
                Priority::Low => dash.low += 1,
            }
        }
        dash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FilterMode;
    use crate::store::TaskStore;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_single_task_scenario() {
        let mut store = TaskStore::default();
        store
            .create("Essay", "English", Priority::High, date("2025-01-10"), "60")
            .unwrap();
        assert_eq!(store.tasks.len(), 1);
        assert!(!store.tasks[0].completed);

        let dash = Dashboard::compute(&store.tasks, at("2025-01-05 09:00:00"));
        assert_eq!(dash.pending, 1);
        assert_eq!(dash.completed, 0);
        assert_eq!(dash.high, 1);
        assert_eq!(dash.total_pending_minutes, 60);
    }

    #[test]
    fn test_completion_moves_metrics() {
        let mut store = TaskStore::default();
        store
            .create("Essay", "English", Priority::High, date("2025-01-10"), "60")
            .unwrap();
        let id = store.tasks[0].id;
        store.complete(id);

        let dash = Dashboard::compute(&store.tasks, at("2025-01-05 09:00:00"));
        assert_eq!(dash.pending, 0);
        assert_eq!(dash.completed, 1);
        assert_eq!(dash.total_pending_minutes, 0);
        // Priority counts ignore completion.
        assert_eq!(dash.high, 1);
    }

    #[test]
    fn test_pending_plus_completed_equals_total() {
        let mut store = TaskStore::default();
        for i in 0..5 {
            store
                .create(
                    &format!("Task {i}"),
                    "Maths",
                    Priority::Medium,
                    date("2025-01-20"),
                    "30",
                )
                .unwrap();
        }
        let first = store.tasks[0].id;
        let third = store.tasks[2].id;
        store.complete(first);
        store.complete(third);

        let dash = Dashboard::compute(&store.tasks, at("2025-01-05 09:00:00"));
        assert_eq!(dash.pending + dash.completed, store.tasks.len());
        assert_eq!(dash.pending, store.select(FilterMode::Pending).len());
        assert_eq!(dash.completed, store.select(FilterMode::Completed).len());
    }

    #[test]
    fn test_due_soon_window() {
        let mut store = TaskStore::default();
        // Midnight already passed: not due soon even though it is today.
        store
            .create("Today", "A", Priority::High, date("2025-01-05"), "10")
            .unwrap();
        store
            .create("Tomorrow", "B", Priority::High, date("2025-01-06"), "10")
            .unwrap();
        // 2.5 fractional days out at noon: inside the window.
        store
            .create("Near edge", "C", Priority::High, date("2025-01-08"), "10")
            .unwrap();
        // 3.5 fractional days out: beyond the window.
        store
            .create("Past edge", "D", Priority::High, date("2025-01-09"), "10")
            .unwrap();
        // Completed tasks never count.
        store
            .create("Done soon", "E", Priority::High, date("2025-01-06"), "10")
            .unwrap();
        let done = store.tasks[4].id;
        store.complete(done);

        let dash = Dashboard::compute(&store.tasks, at("2025-01-05 12:00:00"));
        assert_eq!(dash.due_soon, 2);
    }

    #[test]
    fn test_malformed_duration_excluded_from_sum() {
        let mut store = TaskStore::default();
        store
            .create("Good", "Maths", Priority::Low, date("2025-01-20"), "45")
            .unwrap();
        store
            .create("Bad", "Maths", Priority::Low, date("2025-01-20"), "forty")
            .unwrap();

        let dash = Dashboard::compute(&store.tasks, at("2025-01-05 09:00:00"));
        assert_eq!(dash.total_pending_minutes, 45);
        assert_eq!(dash.malformed_durations, 1);
    }
}
