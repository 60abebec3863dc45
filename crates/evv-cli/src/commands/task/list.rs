use crate::cli::GlobalFlags;
use crate::commands::Outcome;
use crate::commands::shared::envelope::respond;
use crate::context::AppContext;

pub async fn run(
    schedule_id: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    let result = ctx
        .service
        .tasks
        .list_tasks_by_schedule(&ctx.request(), schedule_id)
        .await;
    respond(result, "Tasks retrieved successfully", flags)
}
