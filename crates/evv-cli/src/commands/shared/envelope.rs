use evv_core::errors::ServiceError;
use evv_core::filter::Page;
use evv_core::responses::{ApiResponse, PaginatedResponse};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Whether a command succeeded; decides the process exit status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Print `{success, message, data}` or the error envelope.
pub fn respond<T: Serialize>(
    result: Result<T, ServiceError>,
    message: &str,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    match result {
        Ok(data) => {
            output(&ApiResponse::ok(data, message), flags.format)?;
            Ok(Outcome::Success)
        }
        Err(err) => fail(&err, flags),
    }
}

/// Like [`respond`] for operations without a payload.
pub fn respond_done(
    result: Result<(), ServiceError>,
    message: &str,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    match result {
        Ok(()) => {
            output(&ApiResponse::done(message), flags.format)?;
            Ok(Outcome::Success)
        }
        Err(err) => fail(&err, flags),
    }
}

/// Like [`respond`] with the paginated envelope.
pub fn respond_page<T: Serialize>(
    result: Result<Page<T>, ServiceError>,
    message: &str,
    flags: &GlobalFlags,
) -> anyhow::Result<Outcome> {
    match result {
        Ok(page) => {
            output(&PaginatedResponse::ok(page, message), flags.format)?;
            Ok(Outcome::Success)
        }
        Err(err) => fail(&err, flags),
    }
}

fn fail(err: &ServiceError, flags: &GlobalFlags) -> anyhow::Result<Outcome> {
    output(&ApiResponse::<()>::error(err), flags.format)?;
    Ok(Outcome::Failure)
}
