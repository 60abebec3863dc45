use clap::Subcommand;

use crate::cli::subcommands::{ScheduleCommands, TaskCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Scheduled visits: listing, detail, check-in and check-out.
    Schedule {
        #[command(subcommand)]
        action: ScheduleCommands,
    },
    /// Care tasks within a visit.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
}
