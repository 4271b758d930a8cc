use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed study task tracker.
/// Storage defaults to ~/.focusflow/tasks.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "focusflow", version, about = "Study task tracking and focus timer")]
pub struct Cli {
    /// Path to the JSON task store file.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
