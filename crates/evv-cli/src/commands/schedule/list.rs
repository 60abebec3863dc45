use evv_core::filter::ScheduleFilter;

use crate::cli::GlobalFlags;
use crate::commands::Outcome;
use crate::commands::shared::envelope::respond_page;
use crate::context::AppContext;

pub async fn run(
    page: Option<i64>,
    limit: Option<i64>,
    date: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    let default_limit = i64::from(ctx.config.general.default_page_size);
    let filter = ScheduleFilter {
        page,
        limit: Some(limit.unwrap_or(default_limit)),
        date: date.map(String::from),
    };

    let result = ctx
        .service
        .schedules
        .list_schedules(&ctx.request(), &filter)
        .await;
    respond_page(result, "Schedules retrieved successfully", flags)
}
