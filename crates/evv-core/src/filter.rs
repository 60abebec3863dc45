//! Schedule list filter and pagination arithmetic.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::validation::parse_calendar_date;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Raw list filter as supplied by a caller.
///
/// Values are signed and optional so that missing, zero, and negative inputs
/// reach [`ScheduleFilter::normalize`] unchanged and get clamped there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScheduleFilter {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
}

/// A validated filter, ready for the persistence gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub page: u32,
    pub page_size: u32,
    pub day: Option<NaiveDate>,
}

impl ScheduleFilter {
    /// Clamp page/limit below 1 to their defaults, then validate bounds and
    /// the optional date.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the limit exceeds [`MAX_PAGE_SIZE`], the page does
    /// not fit in `u32`, or the date is not `YYYY-MM-DD`.
    pub fn normalize(&self) -> Result<ScheduleQuery, ServiceError> {
        let page = match self.page {
            Some(p) if p >= 1 => u32::try_from(p)
                .map_err(|_| ServiceError::invalid(format!("page {p} is out of range")))?,
            _ => DEFAULT_PAGE,
        };

        let page_size = match self.limit {
            Some(l) if l >= 1 => {
                if l > i64::from(MAX_PAGE_SIZE) {
                    return Err(ServiceError::invalid(format!(
                        "limit must be between 1 and {MAX_PAGE_SIZE}, got {l}"
                    )));
                }
                // Bounded by MAX_PAGE_SIZE above.
                u32::try_from(l).unwrap_or(MAX_PAGE_SIZE)
            }
            _ => DEFAULT_PAGE_SIZE,
        };

        let day = match self.date.as_deref() {
            Some(d) if !d.is_empty() => Some(parse_calendar_date("date", d)?),
            _ => None,
        };

        Ok(ScheduleQuery {
            page,
            page_size,
            day,
        })
    }
}

impl ScheduleQuery {
    /// Zero-based row offset: `(page - 1) * page_size`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// `ceil(total / page_size)`, defined as 0 when there are no rows.
#[must_use]
pub fn total_pages(total_items: u64, page_size: u32) -> u64 {
    if total_items == 0 || page_size == 0 {
        return 0;
    }
    total_items.div_ceil(u64::from(page_size))
}

/// One page of results plus the counts needed to navigate the rest.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(data: Vec<T>, query: &ScheduleQuery, total_items: u64) -> Self {
        Self {
            data,
            page: query.page,
            page_size: query.page_size,
            total_items,
            total_pages: total_pages(total_items, query.page_size),
        }
    }
}
