use evv_core::requests::VisitRequest;

use crate::cli::GlobalFlags;
use crate::commands::Outcome;
use crate::commands::shared::envelope::respond_done;
use crate::context::AppContext;

pub async fn run(
    id: &str,
    latitude: Option<f64>,
    longitude: Option<f64>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    let request = VisitRequest {
        id: id.to_string(),
        latitude,
        longitude,
    };
    let result = ctx
        .service
        .schedules
        .end_visit(&ctx.request(), &request)
        .await;
    respond_done(result, "Visit ended successfully", flags)
}
