use clap::Subcommand;

/// Task commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// List the tasks of a schedule.
    List { schedule_id: String },
    /// Change a task's status.
    Update {
        task_id: String,
        /// pending, in-progress, completed, not_completed, cancelled
        #[arg(long)]
        status: String,
        /// Required when the status is not_completed
        #[arg(long)]
        reason: Option<String>,
    },
}
