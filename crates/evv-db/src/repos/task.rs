//! Task repository: per-schedule listing and guarded status updates.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use evv_core::context::RequestContext;
use evv_core::entities::Task;
use evv_core::enums::TaskStatus;

use crate::EvvDb;
use crate::error::DatabaseError;
use crate::gateway::TaskGateway;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, within};

const SELECT_COLS: &str = "id, schedule_id, description, status, reason, created_at, updated_at";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        schedule_id: row.get(1)?,
        description: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        reason: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

/// libSQL-backed [`TaskGateway`].
#[derive(Clone)]
pub struct TaskRepo {
    db: Arc<EvvDb>,
}

impl TaskRepo {
    #[must_use]
    pub const fn new(db: Arc<EvvDb>) -> Self {
        Self { db }
    }

    fn db(&self) -> &EvvDb {
        &self.db
    }
}

#[async_trait]
impl TaskGateway for TaskRepo {
    async fn list_tasks_for_schedule(
        &self,
        ctx: &RequestContext,
        schedule_id: &str,
    ) -> Result<Vec<Task>, DatabaseError> {
        within(ctx, async {
            let mut rows = self
                .db()
                .conn()
                .query(
                    &format!(
                        "SELECT {SELECT_COLS} FROM tasks WHERE schedule_id = ?1 \
                         ORDER BY julianday(created_at) ASC, rowid ASC"
                    ),
                    [schedule_id],
                )
                .await?;

            let mut tasks = Vec::new();
            while let Some(row) = rows.next().await? {
                tasks.push(row_to_task(&row)?);
            }
            Ok(tasks)
        })
        .await
    }

    async fn get_task(&self, ctx: &RequestContext, id: &str) -> Result<Task, DatabaseError> {
        within(ctx, async {
            let mut rows = self
                .db()
                .conn()
                .query(&format!("SELECT {SELECT_COLS} FROM tasks WHERE id = ?1"), [id])
                .await?;
            let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
            row_to_task(&row)
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
        within(ctx, async {
            let now = Utc::now();
            let changed = self
                .db()
                .conn()
                .execute(
                    "UPDATE tasks SET status = ?1, reason = ?2, updated_at = ?3 \
                     WHERE id = ?4 AND status = ?5",
                    libsql::params![
                        status.as_str(),
                        reason,
                        now.to_rfc3339(),
                        id,
                        expected.as_str()
                    ],
                )
                .await?;
            Ok(changed > 0)
        })
        .await
    }
}
