use evv_core::requests::SetScheduleStatusRequest;

use crate::cli::GlobalFlags;
use crate::commands::Outcome;
use crate::commands::shared::envelope::respond_done;
use crate::context::AppContext;

pub async fn run(
    id: &str,
    status: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    let request = SetScheduleStatusRequest {
        id: id.to_string(),
        status: status.to_string(),
    };
    let result = ctx
        .service
        .schedules
        .set_status(&ctx.request(), &request)
        .await;
    respond_done(result, "Schedule status updated successfully", flags)
}
