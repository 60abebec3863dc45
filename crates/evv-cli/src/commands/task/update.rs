use evv_core::requests::UpdateTaskStatusRequest;

use crate::cli::GlobalFlags;
use crate::commands::Outcome;
use crate::commands::shared::envelope::respond_done;
use crate::context::AppContext;

pub async fn run(
    task_id: &str,
    status: &str,
    reason: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    let request = UpdateTaskStatusRequest {
        task_id: task_id.to_string(),
        status: status.to_string(),
        reason: reason.map(String::from),
    };
    let result = ctx
        .service
        .tasks
        .update_task_status(&ctx.request(), &request)
        .await;
    respond_done(result, "Task status updated successfully", flags)
}
