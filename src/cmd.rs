//! Command implementations for the CLI interface.
//!
//! This module contains all the command handlers that implement the
//! subcommands available in the CLI, from task CRUD operations to the
//! dashboard summary and the TUI launcher.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use std::path::Path;

use chrono::Local;

use crate::fields::{FilterMode, Priority};
use crate::stats::Dashboard;
use crate::store::{format_priority, parse_deadline_input, print_table, truncate, TaskStore};
use crate::task::Task;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI interface.
    Ui,

    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Subject the task belongs to (e.g. "Maths").
        #[arg(long)]
        subject: String,
        /// Priority: high | medium | low.
        #[arg(long, value_enum)]
        priority: Priority,
        /// Deadline: YYYY-MM-DD, "today", "tomorrow", or "in Nd".
        #[arg(long)]
        deadline: String,
        /// Estimated duration in minutes.
        #[arg(long)]
        duration: String,
    },

    /// List tasks with optional filters.
    List {
        /// Visibility filter: all | pending | completed.
        #[arg(long, value_enum, default_value_t = FilterMode::All)]
        filter: FilterMode,
        /// Only show tasks with this priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Limit number of rows printed.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Mark a task completed.
    Complete {
        /// Task ID to complete.
        id: u64,
    },

    /// Delete a task by ID.
    Delete {
        /// Task ID to delete.
        id: u64,
    },

    /// Show the dashboard summary.
    Stats,

    /// List distinct subjects and counts.
    Subjects,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(store_path: &Path) {
    if let Err(e) = run_tui(store_path) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task to the store.
pub fn cmd_add(
    store: &mut TaskStore,
    store_path: &Path,
    title: String,
    subject: String,
    priority: Priority,
    deadline: String,
    duration: String,
) {
    let Some(deadline) = parse_deadline_input(&deadline) else {
        eprintln!("Could not understand deadline '{deadline}'. Try YYYY-MM-DD, today, tomorrow, or 'in 3d'.");
        std::process::exit(1);
    };

    let (id, title) = match store.create(&title, &subject, priority, deadline, &duration) {
        Ok(task) => (task.id, task.title.clone()),
        Err(e) => {
            eprintln!("Task not added: {e}");
            std::process::exit(1);
        }
    };

    save_or_exit(store, store_path);
    println!("Added {} - {}", id, title);
}

/// List tasks for a filter mode, preserving creation order.
pub fn cmd_list(
    store: &TaskStore,
    filter: FilterMode,
    priority: Option<Priority>,
    limit: Option<usize>,
) {
    let mut visible: Vec<&Task> = store
        .select(filter)
        .into_iter()
        .filter(|t| priority.map_or(true, |p| t.priority == p))
        .collect();

    if let Some(n) = limit {
        visible.truncate(n);
    }

    if visible.is_empty() {
        println!("No tasks to display.");
        return;
    }
    print_table(&visible);
}

/// Mark a task done.
pub fn cmd_complete(store: &mut TaskStore, store_path: &Path, id: u64) {
    if !store.complete(id) {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    }
    save_or_exit(store, store_path);
    println!("Marked done.");
}

/// Delete a task.
pub fn cmd_delete(store: &mut TaskStore, store_path: &Path, id: u64) {
    if !store.delete(id) {
        eprintln!("Task {} not found.", id);
        std::process::exit(1);
    }
    save_or_exit(store, store_path);
    println!("Deleted.");
}

/// Print the dashboard summary computed over the full store.
pub fn cmd_stats(store: &TaskStore) {
    let dash = Dashboard::compute(&store.tasks, Local::now().naive_local());

    println!("{:<22} {}", "Metric", "Value");
    println!("{:<22} {}", "Pending", dash.pending);
    println!("{:<22} {}", "Completed", dash.completed);
    for (p, count) in [
        (Priority::High, dash.high),
        (Priority::Medium, dash.medium),
        (Priority::Low, dash.low),
    ] {
        println!("{:<22} {}", format!("{} priority", format_priority(p)), count);
    }
    println!("{:<22} {}", "Due within 3 days", dash.due_soon);
    println!("{:<22} {}", "Pending minutes", dash.total_pending_minutes);

    if dash.malformed_durations > 0 {
        eprintln!(
            "Warning: {} pending task(s) have a non-numeric duration and were excluded from the total.",
            dash.malformed_durations
        );
    }
}

/// List all distinct subjects with their task counts.
pub fn cmd_subjects(store: &TaskStore) {
    println!("{:<16} {}", "Subject", "Count");
    for (subject, count) in store.subjects() {
        println!("{:<16} {}", truncate(&subject, 16), count);
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

fn save_or_exit(store: &TaskStore, store_path: &Path) {
    if let Err(e) = store.save(store_path) {
        eprintln!("Failed to save tasks: {e}");
        std::process::exit(1);
    }
}
