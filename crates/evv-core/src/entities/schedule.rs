use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Task;
use crate::enums::ScheduleStatus;

/// A caregiver visit assignment.
///
/// Check-in and check-out are stored as three flat columns each. They are
/// written together by the visit operations, so either all three are set or
/// none are; [`Schedule::check_in`] and [`Schedule::check_out`] expose them
/// as a single value.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Schedule {
    pub id: String,
    pub client_name: String,
    pub shift_time: DateTime<Utc>,
    pub location: String,
    pub status: ScheduleStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub start_latitude: Option<f64>,
    pub start_longitude: Option<f64>,
    pub end_time: Option<DateTime<Utc>>,
    pub end_latitude: Option<f64>,
    pub end_longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Only populated by the detail view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
}

/// A geo-stamped visit event (check-in or check-out).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct VisitCheckpoint {
    pub at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Schedule {
    #[must_use]
    pub fn check_in(&self) -> Option<VisitCheckpoint> {
        checkpoint(self.start_time, self.start_latitude, self.start_longitude)
    }

    #[must_use]
    pub fn check_out(&self) -> Option<VisitCheckpoint> {
        checkpoint(self.end_time, self.end_latitude, self.end_longitude)
    }

    /// Attach tasks for the detail view.
    #[must_use]
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = Some(tasks);
        self
    }
}

fn checkpoint(
    at: Option<DateTime<Utc>>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Option<VisitCheckpoint> {
    match (at, latitude, longitude) {
        (Some(at), Some(latitude), Some(longitude)) => Some(VisitCheckpoint {
            at,
            latitude,
            longitude,
        }),
        _ => None,
    }
}
