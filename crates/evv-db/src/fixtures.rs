//! Out-of-band seeding for schedules and tasks.
//!
//! The lifecycle components never create rows; schedules and their tasks are
//! provisioned by whoever plans the visits. These builders do that for
//! tests and local setups.

use chrono::{DateTime, Utc};
use evv_core::enums::{ScheduleStatus, TaskStatus};
use uuid::Uuid;

use crate::EvvDb;
use crate::error::DatabaseError;

#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub client_name: String,
    pub shift_time: DateTime<Utc>,
    pub location: String,
    pub status: ScheduleStatus,
}

impl NewSchedule {
    pub fn new(client_name: impl Into<String>, shift_time: DateTime<Utc>) -> Self {
        Self {
            client_name: client_name.into(),
            shift_time,
            location: String::new(),
            status: ScheduleStatus::Upcoming,
        }
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    #[must_use]
    pub const fn status(mut self, status: ScheduleStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub schedule_id: String,
    pub description: String,
    pub status: TaskStatus,
    pub reason: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewTask {
    pub fn new(schedule_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            schedule_id: schedule_id.into(),
            description: description.into(),
            status: TaskStatus::Pending,
            reason: None,
            created_at: None,
        }
    }

    #[must_use]
    pub const fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Pin the creation time, which decides list order.
    #[must_use]
    pub const fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }
}

/// Insert a schedule with a fresh UUID and return that id.
///
/// # Errors
///
/// Returns `DatabaseError` if the insert fails.
pub async fn insert_schedule(db: &EvvDb, new: &NewSchedule) -> Result<String, DatabaseError> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();
    db.conn()
        .execute(
            "INSERT INTO schedules (id, client_name, shift_time, location, status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            libsql::params![
                id.as_str(),
                new.client_name.as_str(),
                new.shift_time.to_rfc3339(),
                new.location.as_str(),
                new.status.as_str(),
                now.as_str(),
                now.as_str()
            ],
        )
        .await?;
    tracing::debug!(schedule_id = %id, client = %new.client_name, "seeded schedule");
    Ok(id)
}

/// Insert a task under an existing schedule and return its fresh UUID.
///
/// # Errors
///
/// Returns `DatabaseError` if the insert fails, including when the schedule
/// does not exist.
pub async fn insert_task(db: &EvvDb, new: &NewTask) -> Result<String, DatabaseError> {
    let id = Uuid::new_v4().to_string();
    let created = new.created_at.unwrap_or_else(Utc::now).to_rfc3339();
    db.conn()
        .execute(
            "INSERT INTO tasks (id, schedule_id, description, status, reason, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            libsql::params![
                id.as_str(),
                new.schedule_id.as_str(),
                new.description.as_str(),
                new.status.as_str(),
                new.reason.as_deref(),
                created.as_str(),
                created.as_str()
            ],
        )
        .await?;
    tracing::debug!(task_id = %id, schedule_id = %new.schedule_id, "seeded task");
    Ok(id)
}
