//! # FocusFlow - Study Task Tracker CLI
//!
//! A terminal study planner: track tasks by subject, priority, deadline and
//! estimated duration, run a 25-minute focus timer, and review aggregate
//! statistics on a dashboard.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the interactive TUI
//! focusflow ui
//!
//! # Add a task via CLI
//! focusflow add "Essay draft" --subject English --priority high \
//!     --deadline 2025-01-10 --duration 60
//!
//! # List pending tasks
//! focusflow list --filter pending
//!
//! # Mark a task done / remove it
//! focusflow complete <id>
//! focusflow delete <id>
//!
//! # Dashboard summary
//! focusflow stats
//! ```
//!
//! Tasks are stored locally in `~/.focusflow/tasks.json` as a single JSON
//! document, rewritten in full on every change. Point `--db` at another file
//! to keep separate task lists.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod fields;
pub mod stats;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod quotes;
    pub mod run;
    pub mod task_form;
    pub mod timer;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use store::TaskStore;

fn main() {
    let cli = Cli::parse();

    // Completions need no storage at all.
    if let Commands::Completions { shell } = cli.command {
        cmd_completions(shell);
        return;
    }

    let store_path = cli.db.unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        let dir = PathBuf::from(home).join(".focusflow");
        if let Err(e) = std::fs::create_dir_all(&dir) {
            eprintln!("Failed to create data directory {}: {}", dir.display(), e);
            std::process::exit(1);
        }
        dir.join("tasks.json")
    });

    // The TUI owns its own load/save cycle.
    if let Commands::Ui = cli.command {
        cmd_ui(&store_path);
        return;
    }

    let mut store = match TaskStore::load(&store_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to load tasks from {}: {}", store_path.display(), e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Ui | Commands::Completions { .. } => unreachable!("handled above"),

        Commands::Add {
            title,
            subject,
            priority,
            deadline,
            duration,
        } => cmd_add(&mut store, &store_path, title, subject, priority, deadline, duration),

        Commands::List {
            filter,
            priority,
            limit,
        } => cmd_list(&store, filter, priority, limit),

        Commands::Complete { id } => cmd_complete(&mut store, &store_path, id),

        Commands::Delete { id } => cmd_delete(&mut store, &store_path, id),

        Commands::Stats => cmd_stats(&store),

        Commands::Subjects => cmd_subjects(&store),
    }
}
