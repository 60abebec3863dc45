//! Schedule repository: paged listing, point lookup, visit check-in/out.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use evv_core::context::RequestContext;
use evv_core::entities::{Schedule, VisitCheckpoint};
use evv_core::enums::ScheduleStatus;
use evv_core::filter::ScheduleQuery;

use crate::EvvDb;
use crate::error::DatabaseError;
use crate::gateway::ScheduleGateway;
use crate::helpers::{get_opt_f64, parse_datetime, parse_enum, parse_optional_datetime, within};

const SELECT_COLS: &str = "id, client_name, shift_time, location, status, \
     start_time, start_latitude, start_longitude, \
     end_time, end_latitude, end_longitude, created_at, updated_at";

fn row_to_schedule(row: &libsql::Row) -> Result<Schedule, DatabaseError> {
    Ok(Schedule {
        id: row.get(0)?,
        client_name: row.get(1)?,
        shift_time: parse_datetime(&row.get::<String>(2)?)?,
        location: row.get(3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        start_time: parse_optional_datetime(row.get::<Option<String>>(5)?.as_deref())?,
        start_latitude: get_opt_f64(row, 6)?,
        start_longitude: get_opt_f64(row, 7)?,
        end_time: parse_optional_datetime(row.get::<Option<String>>(8)?.as_deref())?,
        end_latitude: get_opt_f64(row, 9)?,
        end_longitude: get_opt_f64(row, 10)?,
        created_at: parse_datetime(&row.get::<String>(11)?)?,
        updated_at: parse_datetime(&row.get::<String>(12)?)?,
        tasks: None,
    })
}

/// `[start of day, start of next day)` in `SQLite` datetime layout.
fn day_bounds(day: NaiveDate) -> Result<(String, String), DatabaseError> {
    let next = day
        .succ_opt()
        .ok_or_else(|| DatabaseError::InvalidState(format!("no calendar day after {day}")))?;
    Ok((format!("{day} 00:00:00"), format!("{next} 00:00:00")))
}

/// WHERE clause and its parameters for the optional day filter.
///
/// Comparing through `datetime()` lets RFC 3339 and `SQLite`-layout rows
/// filter the same way.
fn day_filter(query: &ScheduleQuery) -> Result<(&'static str, Vec<libsql::Value>), DatabaseError> {
    match query.day {
        Some(day) => {
            let (start, end) = day_bounds(day)?;
            Ok((
                " WHERE datetime(shift_time) >= datetime(?1) AND datetime(shift_time) < datetime(?2)",
                vec![start.into(), end.into()],
            ))
        }
        None => Ok(("", Vec::new())),
    }
}

/// libSQL-backed [`ScheduleGateway`].
#[derive(Clone)]
pub struct ScheduleRepo {
    db: Arc<EvvDb>,
}

impl ScheduleRepo {
    #[must_use]
    pub const fn new(db: Arc<EvvDb>) -> Self {
        Self { db }
    }

    fn db(&self) -> &EvvDb {
        &self.db
    }

    async fn record_visit(
        &self,
        id: &str,
        columns: [&str; 3],
        checkpoint: &VisitCheckpoint,
        from: ScheduleStatus,
        to: ScheduleStatus,
    ) -> Result<bool, DatabaseError> {
        let [at_col, lat_col, lon_col] = columns;
        let now = Utc::now();
        let changed = self
            .db()
            .conn()
            .execute(
                &format!(
                    "UPDATE schedules SET status = ?1, {at_col} = ?2, {lat_col} = ?3, \
                     {lon_col} = ?4, updated_at = ?5 WHERE id = ?6 AND status = ?7"
                ),
                libsql::params![
                    to.as_str(),
                    checkpoint.at.to_rfc3339(),
                    checkpoint.latitude,
                    checkpoint.longitude,
                    now.to_rfc3339(),
                    id,
                    from.as_str()
                ],
            )
            .await?;
        Ok(changed > 0)
    }
}

#[async_trait]
impl ScheduleGateway for ScheduleRepo {
    async fn list_schedules(
        &self,
        ctx: &RequestContext,
        query: &ScheduleQuery,
    ) -> Result<Vec<Schedule>, DatabaseError> {
        within(ctx, async {
            let (clause, mut params) = day_filter(query)?;
            let offset = i64::try_from(query.offset()).map_err(|_| {
                DatabaseError::InvalidState(format!("offset {} out of range", query.offset()))
            })?;
            let limit_idx = params.len() + 1;
            let offset_idx = params.len() + 2;
            params.push(i64::from(query.page_size).into());
            params.push(offset.into());

            let mut rows = self
                .db()
                .conn()
                .query(
                    &format!(
                        "SELECT {SELECT_COLS} FROM schedules{clause} \
                         ORDER BY julianday(shift_time) ASC, id ASC \
                         LIMIT ?{limit_idx} OFFSET ?{offset_idx}"
                    ),
                    libsql::params_from_iter(params),
                )
                .await?;

            let mut schedules = Vec::new();
            while let Some(row) = rows.next().await? {
                schedules.push(row_to_schedule(&row)?);
            }
            Ok(schedules)
        })
        .await
    }

    async fn count_schedules(
        &self,
        ctx: &RequestContext,
        query: &ScheduleQuery,
    ) -> Result<u64, DatabaseError> {
        within(ctx, async {
            let (clause, params) = day_filter(query)?;
            let mut rows = self
                .db()
                .conn()
                .query(
                    &format!("SELECT COUNT(*) FROM schedules{clause}"),
                    libsql::params_from_iter(params),
                )
                .await?;
            let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
            let count = row.get::<i64>(0)?;
            u64::try_from(count)
                .map_err(|_| DatabaseError::InvalidState(format!("negative row count {count}")))
        })
        .await
    }

    async fn get_schedule(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Schedule, DatabaseError> {
        within(ctx, async {
            let mut rows = self
                .db()
                .conn()
                .query(
                    &format!("SELECT {SELECT_COLS} FROM schedules WHERE id = ?1"),
                    [id],
                )
                .await?;
            let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
            row_to_schedule(&row)
        })
        .await
    }

    async fn update_schedule_status(
        &self,
        ctx: &RequestContext,
        id: &str,
        status: ScheduleStatus,
    ) -> Result<(), DatabaseError> {
        within(ctx, async {
            let now = Utc::now();
            let changed = self
                .db()
                .conn()
                .execute(
                    "UPDATE schedules SET status = ?1, updated_at = ?2 WHERE id = ?3",
                    libsql::params![status.as_str(), now.to_rfc3339(), id],
                )
                .await?;
            if changed == 0 {
                return Err(DatabaseError::NoResult);
            }
            Ok(())
        })
        .await
    }

    async fn record_check_in(
        &self,
        ctx: &RequestContext,
        id: &str,
        check_in: &VisitCheckpoint,
    ) -> Result<bool, DatabaseError> {
        within(
            ctx,
            self.record_visit(
                id,
                ["start_time", "start_latitude", "start_longitude"],
                check_in,
                ScheduleStatus::Upcoming,
                ScheduleStatus::InProgress,
            ),
        )
        .await
    }

    async fn record_check_out(
        &self,
        ctx: &RequestContext,
        id: &str,
        check_out: &VisitCheckpoint,
    ) -> Result<bool, DatabaseError> {
        within(
            ctx,
            self.record_visit(
                id,
                ["end_time", "end_latitude", "end_longitude"],
                check_out,
                ScheduleStatus::InProgress,
                ScheduleStatus::Completed,
            ),
        )
        .await
    }
}
