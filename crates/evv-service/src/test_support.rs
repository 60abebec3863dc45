//! In-memory gateways for lifecycle unit tests.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use evv_core::context::RequestContext;
use evv_core::entities::{Schedule, Task, VisitCheckpoint};
use evv_core::enums::{ScheduleStatus, TaskStatus};
use evv_core::filter::ScheduleQuery;
use evv_db::error::DatabaseError;
use evv_db::gateway::{ScheduleGateway, TaskGateway};

pub const SCHEDULE_ID: &str = "6f1c2b9e-8a4d-4f7e-9b1a-2c3d4e5f6a7b";
pub const TASK_ID: &str = "0b9e7c55-3f4a-4c2d-8e1f-9a8b7c6d5e4f";

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 30, 9, 0, 0).unwrap()
}

pub fn schedule(id: &str, status: ScheduleStatus) -> Schedule {
    Schedule {
        id: id.to_string(),
        client_name: "Ada Lovelace".to_string(),
        shift_time: fixed_time(),
        location: "12 Elm St".to_string(),
        status,
        start_time: None,
        start_latitude: None,
        start_longitude: None,
        end_time: None,
        end_latitude: None,
        end_longitude: None,
        created_at: fixed_time(),
        updated_at: fixed_time(),
        tasks: None,
    }
}

pub fn task(id: &str, schedule_id: &str, status: TaskStatus) -> Task {
    Task {
        id: id.to_string(),
        schedule_id: schedule_id.to_string(),
        description: "Assist with bathing".to_string(),
        status,
        reason: None,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}

#[derive(Default)]
pub struct MemorySchedules {
    rows: Mutex<Vec<Schedule>>,
    latency: Duration,
    calls: AtomicUsize,
}

impl MemorySchedules {
    pub fn with(rows: Vec<Schedule>) -> Arc<Self> {
        Self::slow(rows, Duration::ZERO)
    }

    /// Every call sleeps for `latency` before touching the rows.
    pub fn slow(rows: Vec<Schedule>, latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(rows),
            latency,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn get(&self, id: &str) -> Option<Schedule> {
        self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned()
    }

    /// Number of gateway calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn call<T>(
        &self,
        ctx: &RequestContext,
        f: impl FnOnce(&mut Vec<Schedule>) -> Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ctx.run(tokio::time::sleep(self.latency)).await?;
        f(&mut self.rows.lock().unwrap())
    }

    fn matching(rows: &[Schedule], query: &ScheduleQuery) -> Vec<Schedule> {
        let mut matching: Vec<_> = rows
            .iter()
            .filter(|s| query.day.is_none_or(|day| s.shift_time.date_naive() == day))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.shift_time.cmp(&b.shift_time).then_with(|| a.id.cmp(&b.id)));
        matching
    }

    fn record(
        rows: &mut [Schedule],
        id: &str,
        from: ScheduleStatus,
        to: ScheduleStatus,
        apply: impl FnOnce(&mut Schedule),
    ) -> bool {
        match rows.iter_mut().find(|s| s.id == id && s.status == from) {
            Some(row) => {
                row.status = to;
                apply(row);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl ScheduleGateway for MemorySchedules {
    async fn list_schedules(
        &self,
        ctx: &RequestContext,
        query: &ScheduleQuery,
    ) -> Result<Vec<Schedule>, DatabaseError> {
        self.call(ctx, |rows| {
            let offset = usize::try_from(query.offset()).unwrap();
            Ok(Self::matching(rows, query)
                .into_iter()
                .skip(offset)
                .take(query.page_size as usize)
                .collect())
        })
        .await
    }

    async fn count_schedules(
        &self,
        ctx: &RequestContext,
        query: &ScheduleQuery,
    ) -> Result<u64, DatabaseError> {
        self.call(ctx, |rows| Ok(Self::matching(rows, query).len() as u64))
            .await
    }

    async fn get_schedule(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Schedule, DatabaseError> {
        self.call(ctx, |rows| {
            rows.iter()
                .find(|s| s.id == id)
                .cloned()
                .ok_or(DatabaseError::NoResult)
        })
        .await
    }

    async fn update_schedule_status(
        &self,
        ctx: &RequestContext,
        id: &str,
        status: ScheduleStatus,
    ) -> Result<(), DatabaseError> {
        self.call(ctx, |rows| {
            let row = rows
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(DatabaseError::NoResult)?;
            row.status = status;
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
        self.call(ctx, |rows| {
            Ok(Self::record(
                rows,
                id,
                ScheduleStatus::Upcoming,
                ScheduleStatus::InProgress,
                |row| {
                    row.start_time = Some(check_in.at);
                    row.start_latitude = Some(check_in.latitude);
                    row.start_longitude = Some(check_in.longitude);
                },
            ))
        })
        .await
    }

    async fn record_check_out(
        &self,
        ctx: &RequestContext,
        id: &str,
        check_out: &VisitCheckpoint,
    ) -> Result<bool, DatabaseError> {
        self.call(ctx, |rows| {
            Ok(Self::record(
                rows,
                id,
                ScheduleStatus::InProgress,
                ScheduleStatus::Completed,
                |row| {
                    row.end_time = Some(check_out.at);
                    row.end_latitude = Some(check_out.latitude);
                    row.end_longitude = Some(check_out.longitude);
                },
            ))
        })
        .await
    }
}

#[derive(Default)]
pub struct MemoryTasks {
    rows: Mutex<Vec<Task>>,
    calls: AtomicUsize,
}

impl MemoryTasks {
    pub fn with(rows: Vec<Task>) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(rows),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn get(&self, id: &str) -> Option<Task> {
        self.rows.lock().unwrap().iter().find(|t| t.id == id).cloned()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn call<T>(
        &self,
        ctx: &RequestContext,
        f: impl FnOnce(&mut Vec<Task>) -> Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ctx.run(async {}).await?;
        f(&mut self.rows.lock().unwrap())
    }
}

#[async_trait]
impl TaskGateway for MemoryTasks {
    async fn list_tasks_for_schedule(
        &self,
        ctx: &RequestContext,
        schedule_id: &str,
    ) -> Result<Vec<Task>, DatabaseError> {
        self.call(ctx, |rows| {
            Ok(rows
                .iter()
                .filter(|t| t.schedule_id == schedule_id)
                .cloned()
                .collect())
        })
        .await
    }

    async fn get_task(&self, ctx: &RequestContext, id: &str) -> Result<Task, DatabaseError> {
        self.call(ctx, |rows| {
            rows.iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or(DatabaseError::NoResult)
        })
        .await
    }

    async fn update_task_status(
        &self,
        ctx: &RequestContext,
        id: &str,
        expected: TaskStatus,
        status: TaskStatus,
        reason: Option<&str>,
    ) -> Result<bool, DatabaseError> {
        self.call(ctx, |rows| {
            match rows.iter_mut().find(|t| t.id == id && t.status == expected) {
                Some(row) => {
                    row.status = status;
                    row.reason = reason.map(String::from);
                    Ok(true)
                }
                None => Ok(false),
            }
        })
        .await
    }
}

/// Task gateway whose every call fails with a driver error.
pub struct FailingTasks;

#[async_trait]
impl TaskGateway for FailingTasks {
    async fn list_tasks_for_schedule(
        &self,
        _: &RequestContext,
        _: &str,
    ) -> Result<Vec<Task>, DatabaseError> {
        Err(DatabaseError::Query("disk I/O error".into()))
    }

    async fn get_task(&self, _: &RequestContext, _: &str) -> Result<Task, DatabaseError> {
        Err(DatabaseError::Query("disk I/O error".into()))
    }

    async fn update_task_status(
        &self,
        _: &RequestContext,
        _: &str,
        _: TaskStatus,
        _: TaskStatus,
        _: Option<&str>,
    ) -> Result<bool, DatabaseError> {
        Err(DatabaseError::Query("disk I/O error".into()))
    }
}
