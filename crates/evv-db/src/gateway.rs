//! Storage seams used by the lifecycle components.
//!
//! Each aggregate gets one trait. The libSQL implementations live in
//! [`crate::repos`]; tests substitute in-memory fakes.
//!
//! Every method takes the caller's [`RequestContext`] and aborts with
//! `DatabaseError::Cancelled` or `DatabaseError::TimedOut` when it fires.
//! A missing row is always `DatabaseError::NoResult`.

use async_trait::async_trait;
use evv_core::context::RequestContext;
use evv_core::entities::{Schedule, Task, VisitCheckpoint};
use evv_core::enums::{ScheduleStatus, TaskStatus};
use evv_core::filter::ScheduleQuery;

use crate::error::DatabaseError;

#[async_trait]
pub trait ScheduleGateway: Send + Sync {
    /// One page of schedules ordered by shift time, optionally restricted to
    /// a single UTC calendar day. `tasks` is left unset.
    async fn list_schedules(
        &self,
        ctx: &RequestContext,
        query: &ScheduleQuery,
    ) -> Result<Vec<Schedule>, DatabaseError>;

    /// Number of schedules matching the query's day filter, ignoring paging.
    async fn count_schedules(
        &self,
        ctx: &RequestContext,
        query: &ScheduleQuery,
    ) -> Result<u64, DatabaseError>;

    async fn get_schedule(&self, ctx: &RequestContext, id: &str)
    -> Result<Schedule, DatabaseError>;

    /// Overwrite the status without any transition check.
    async fn update_schedule_status(
        &self,
        ctx: &RequestContext,
        id: &str,
        status: ScheduleStatus,
    ) -> Result<(), DatabaseError>;

    /// Write the check-in and move `upcoming` → `in-progress`.
    ///
    /// Returns `false` if the schedule was no longer `upcoming`.
    async fn record_check_in(
        &self,
        ctx: &RequestContext,
        id: &str,
        check_in: &VisitCheckpoint,
    ) -> Result<bool, DatabaseError>;

    /// Write the check-out and move `in-progress` → `completed`.
    ///
    /// Returns `false` if the schedule was no longer `in-progress`.
    async fn record_check_out(
        &self,
        ctx: &RequestContext,
        id: &str,
        check_out: &VisitCheckpoint,
    ) -> Result<bool, DatabaseError>;
}

#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Tasks of one schedule, oldest first. Unknown schedules yield an empty list.
    async fn list_tasks_for_schedule(
        &self,
        ctx: &RequestContext,
        schedule_id: &str,
    ) -> Result<Vec<Task>, DatabaseError>;

    async fn get_task(&self, ctx: &RequestContext, id: &str) -> Result<Task, DatabaseError>;

    /// Store `status` and `reason` if the task is still in `expected`.
    ///
    /// A `None` reason clears the column. Returns `false` when another writer
    /// changed the status first.
    async fn update_task_status(
        &self,
        ctx: &RequestContext,
        id: &str,
        expected: TaskStatus,
        status: TaskStatus,
        reason: Option<&str>,
    ) -> Result<bool, DatabaseError>;
}
