//! Task lifecycle: per-schedule listing and status updates.

use std::sync::Arc;

use evv_core::context::RequestContext;
use evv_core::entities::Task;
use evv_core::errors::ServiceError;
use evv_core::requests::UpdateTaskStatusRequest;
use evv_db::gateway::TaskGateway;

use crate::error::{lookup_failure, storage_failure};

#[derive(Clone)]
pub struct TaskLifecycle {
    tasks: Arc<dyn TaskGateway>,
}

impl TaskLifecycle {
    pub fn new(tasks: Arc<dyn TaskGateway>) -> Self {
        Self { tasks }
    }

    /// Tasks of a schedule, oldest first. An unknown schedule yields an
    /// empty list rather than `NotFound`.
    ///
    /// # Errors
    ///
    /// Storage failures as `Internal`.
    pub async fn list_tasks_by_schedule(
        &self,
        ctx: &RequestContext,
        schedule_id: &str,
    ) -> Result<Vec<Task>, ServiceError> {
        tracing::info!(schedule_id, "listing tasks");
        self.tasks
            .list_tasks_for_schedule(ctx, schedule_id)
            .await
            .map_err(|e| storage_failure("list_tasks_for_schedule", e))
    }

    /// Change a task's status and reason.
    ///
    /// Every transition is allowed except reopening a `completed` task as
    /// `pending`. The stored reason is replaced, and cleared when none is
    /// given.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a bad request (checked before storage),
    /// `NotFound` for an unknown task, `Conflict` for `completed` → `pending`.
    pub async fn update_task_status(
        &self,
        ctx: &RequestContext,
        request: &UpdateTaskStatusRequest,
    ) -> Result<(), ServiceError> {
        let update = request
            .validate()
            .inspect_err(|e| tracing::warn!(error = %e, "rejected task status request"))?;
        let id = update.task_id.to_string();
        tracing::info!(task_id = %id, status = %update.status, "updating task status");

        let current = self
            .tasks
            .get_task(ctx, &id)
            .await
            .map_err(|e| lookup_failure("get_task", "Task", &id, e))?;

        if !current.status.can_transition_to(update.status) {
            tracing::warn!(
                task_id = %id,
                from = %current.status,
                to = %update.status,
                "task transition refused"
            );
            return Err(ServiceError::conflict(format!(
                "Task ID {id} is already {}. Cannot change to {}.",
                current.status, update.status
            )));
        }

        let updated = self
            .tasks
            .update_task_status(
                ctx,
                &id,
                current.status,
                update.status,
                update.reason.as_deref(),
            )
            .await
            .map_err(|e| storage_failure("update_task_status", e))?;
        if !updated {
            tracing::warn!(task_id = %id, "task status changed concurrently");
            return Err(ServiceError::conflict(format!(
                "Task ID {id} was modified while updating. Cannot change to {}.",
                update.status
            )));
        }

        tracing::info!(task_id = %id, status = %update.status, "task status updated");
        Ok(())
    }
}
