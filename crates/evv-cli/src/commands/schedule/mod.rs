mod end;
mod get;
mod list;
mod set_status;
mod start;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ScheduleCommands;
use crate::commands::Outcome;
use crate::context::AppContext;

/// Handle `evv schedule`.
pub async fn handle(
    action: &ScheduleCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    match action {
        ScheduleCommands::List { page, limit, date } => {
            list::run(*page, *limit, date.as_deref(), ctx, flags).await
        }
        ScheduleCommands::Get { id } => get::run(id, ctx, flags).await,
        ScheduleCommands::Start {
            id,
            latitude,
            longitude,
        } => start::run(id, *latitude, *longitude, ctx, flags).await,
        ScheduleCommands::End {
            id,
            latitude,
            longitude,
        } => end::run(id, *latitude, *longitude, ctx, flags).await,
        ScheduleCommands::SetStatus { id, status } => {
            set_status::run(id, status, ctx, flags).await
        }
    }
}
