//! Structural validation helpers.
//!
//! These run before any storage access. Each returns
//! `ServiceError::InvalidArgument` with a message naming the offending field.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Expected layout of calendar-day filters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Require a non-empty, well-formed UUID.
///
/// # Errors
///
/// `InvalidArgument` if `value` is blank or not a UUID.
pub fn require_uuid(field: &str, value: &str) -> Result<Uuid, ServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::invalid(format!("{field} is required")));
    }
    Uuid::parse_str(value).map_err(|_| ServiceError::invalid(format!("Invalid {field} format")))
}

/// Require a coordinate to be present and finite.
///
/// Geographic plausibility is not checked.
///
/// # Errors
///
/// `InvalidArgument` if the value is missing, NaN, or infinite.
pub fn require_coordinate(field: &str, value: Option<f64>) -> Result<f64, ServiceError> {
    match value {
        None => Err(ServiceError::invalid(format!("{field} is required"))),
        Some(v) if !v.is_finite() => Err(ServiceError::invalid(format!(
            "{field} must be a finite number"
        ))),
        Some(v) => Ok(v),
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// The layout is checked byte by byte first: chrono alone tolerates
/// single-digit fields, leading whitespace, and signed years.
///
/// # Errors
///
/// `InvalidArgument` if the value does not match the layout or names an
/// impossible date.
pub fn parse_calendar_date(field: &str, value: &str) -> Result<NaiveDate, ServiceError> {
    let invalid = || ServiceError::invalid(format!("{field} must use the YYYY-MM-DD format"));
    if !is_calendar_layout(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

fn is_calendar_layout(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Normalize optional free text: trimmed, with blank treated as absent.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
