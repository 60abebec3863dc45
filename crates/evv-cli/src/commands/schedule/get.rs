use crate::cli::GlobalFlags;
use crate::commands::Outcome;
use crate::commands::shared::envelope::respond;
use crate::context::AppContext;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<Outcome> {
    let result = ctx
        .service
        .schedules
        .get_schedule_detail(&ctx.request(), id)
        .await;
    respond(result, "Schedule details retrieved successfully", flags)
}
