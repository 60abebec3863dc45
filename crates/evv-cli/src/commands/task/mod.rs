mod list;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::commands::Outcome;
use crate::context::AppContext;

/// Handle `evv task`.
pub async fn handle(
    action: &TaskCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    match action {
        TaskCommands::List { schedule_id } => list::run(schedule_id, ctx, flags).await,
        TaskCommands::Update {
            task_id,
            status,
            reason,
        } => update::run(task_id, status, reason.as_deref(), ctx, flags).await,
    }
}
