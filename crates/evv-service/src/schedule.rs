//! Schedule lifecycle: listing, detail view, and the visit state machine.

use std::sync::Arc;

use chrono::Utc;
use evv_core::context::RequestContext;
use evv_core::entities::{Schedule, VisitCheckpoint};
use evv_core::enums::ScheduleStatus;
use evv_core::errors::ServiceError;
use evv_core::filter::{Page, ScheduleFilter};
use evv_core::requests::{SetScheduleStatusRequest, VisitRequest};
use evv_core::validation::require_uuid;
use evv_db::gateway::{ScheduleGateway, TaskGateway};

use crate::error::{lookup_failure, storage_failure};

const ENTITY: &str = "Schedule";

/// Orchestrates schedule reads and the `upcoming → in-progress → completed`
/// visit transitions.
#[derive(Clone)]
pub struct ScheduleLifecycle {
    schedules: Arc<dyn ScheduleGateway>,
    tasks: Arc<dyn TaskGateway>,
}

impl ScheduleLifecycle {
    pub fn new(schedules: Arc<dyn ScheduleGateway>, tasks: Arc<dyn TaskGateway>) -> Self {
        Self { schedules, tasks }
    }

    /// One page of schedules plus the total count for the same filter.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a limit above the maximum or a malformed date;
    /// storage failures as `Internal`.
    pub async fn list_schedules(
        &self,
        ctx: &RequestContext,
        filter: &ScheduleFilter,
    ) -> Result<Page<Schedule>, ServiceError> {
        let query = filter.normalize().inspect_err(|e| {
            tracing::warn!(error = %e, "rejected schedule list filter");
        })?;
        tracing::info!(
            page = query.page,
            page_size = query.page_size,
            day = ?query.day,
            "listing schedules"
        );

        let schedules = self
            .schedules
            .list_schedules(ctx, &query)
            .await
            .map_err(|e| storage_failure("list_schedules", e))?;
        let total = self
            .schedules
            .count_schedules(ctx, &query)
            .await
            .map_err(|e| storage_failure("count_schedules", e))?;

        Ok(Page::new(schedules, &query, total))
    }

    /// A schedule with its tasks attached.
    ///
    /// Failing to load the tasks is not fatal: the schedule comes back with
    /// an empty task list and the failure is logged.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a malformed id, `NotFound` for an unknown one.
    pub async fn get_schedule_detail(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Schedule, ServiceError> {
        let id = require_uuid("schedule id", id)
            .inspect_err(|e| tracing::warn!(error = %e, "rejected schedule detail request"))?
            .to_string();
        tracing::info!(schedule_id = %id, "fetching schedule detail");

        let schedule = self
            .schedules
            .get_schedule(ctx, &id)
            .await
            .map_err(|e| lookup_failure("get_schedule", ENTITY, &id, e))?;

        let tasks = match self.tasks.list_tasks_for_schedule(ctx, &id).await {
            Ok(tasks) => tasks,
            Err(error) => {
                tracing::error!(
                    schedule_id = %id,
                    %error,
                    "failed to load tasks; returning schedule without them"
                );
                Vec::new()
            }
        };

        Ok(schedule.with_tasks(tasks))
    }

    /// Check in: record time and location and move `upcoming` → `in-progress`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument`, `NotFound`, or `Conflict` when the visit is not
    /// `upcoming`.
    pub async fn start_visit(
        &self,
        ctx: &RequestContext,
        request: &VisitRequest,
    ) -> Result<(), ServiceError> {
        let visit = request
            .validate()
            .inspect_err(|e| tracing::warn!(error = %e, "rejected start visit request"))?;
        let id = visit.id.to_string();
        tracing::info!(schedule_id = %id, "starting visit");

        let schedule = self
            .schedules
            .get_schedule(ctx, &id)
            .await
            .map_err(|e| lookup_failure("get_schedule", ENTITY, &id, e))?;

        if !schedule.status.can_transition_to(ScheduleStatus::InProgress) {
            tracing::warn!(schedule_id = %id, status = %schedule.status, "visit cannot start");
            return Err(ServiceError::conflict(format!(
                "Visit for schedule ID {id} is already {}. Cannot start.",
                schedule.status
            )));
        }

        let check_in = VisitCheckpoint {
            at: Utc::now(),
            latitude: visit.latitude,
            longitude: visit.longitude,
        };
        let recorded = self
            .schedules
            .record_check_in(ctx, &id, &check_in)
            .await
            .map_err(|e| storage_failure("record_check_in", e))?;
        if !recorded {
            tracing::warn!(schedule_id = %id, "visit started concurrently");
            return Err(ServiceError::conflict(format!(
                "Visit for schedule ID {id} is no longer {}. Cannot start.",
                ScheduleStatus::Upcoming
            )));
        }

        tracing::info!(schedule_id = %id, "visit started");
        Ok(())
    }

    /// Check out: record time and location and move `in-progress` → `completed`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument`, `NotFound`, or `Conflict` when the visit is not
    /// `in-progress`.
    pub async fn end_visit(
        &self,
        ctx: &RequestContext,
        request: &VisitRequest,
    ) -> Result<(), ServiceError> {
        let visit = request
            .validate()
            .inspect_err(|e| tracing::warn!(error = %e, "rejected end visit request"))?;
        let id = visit.id.to_string();
        tracing::info!(schedule_id = %id, "ending visit");

        let schedule = self
            .schedules
            .get_schedule(ctx, &id)
            .await
            .map_err(|e| lookup_failure("get_schedule", ENTITY, &id, e))?;

        if !schedule.status.can_transition_to(ScheduleStatus::Completed) {
            tracing::warn!(schedule_id = %id, status = %schedule.status, "visit cannot end");
            return Err(ServiceError::conflict(format!(
                "Visit for schedule ID {id} is currently {}. Cannot end.",
                schedule.status
            )));
        }

        let check_out = VisitCheckpoint {
            at: Utc::now(),
            latitude: visit.latitude,
            longitude: visit.longitude,
        };
        let recorded = self
            .schedules
            .record_check_out(ctx, &id, &check_out)
            .await
            .map_err(|e| storage_failure("record_check_out", e))?;
        if !recorded {
            tracing::warn!(schedule_id = %id, "visit ended concurrently");
            return Err(ServiceError::conflict(format!(
                "Visit for schedule ID {id} is no longer {}. Cannot end.",
                ScheduleStatus::InProgress
            )));
        }

        tracing::info!(schedule_id = %id, "visit ended");
        Ok(())
    }

    /// Administrative override: overwrite the status without checking the
    /// visit state machine.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a blank id or unknown status, `NotFound` for an
    /// unknown id.
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        request: &SetScheduleStatusRequest,
    ) -> Result<(), ServiceError> {
        let (id, status) = request
            .validate()
            .inspect_err(|e| tracing::warn!(error = %e, "rejected schedule status request"))?;
        tracing::info!(schedule_id = %id, %status, "overriding schedule status");

        self.schedules
            .get_schedule(ctx, &id)
            .await
            .map_err(|e| lookup_failure("get_schedule", ENTITY, &id, e))?;

        self.schedules
            .update_schedule_status(ctx, &id, status)
            .await
            .map_err(|e| lookup_failure("update_schedule_status", ENTITY, &id, e))
    }
}
