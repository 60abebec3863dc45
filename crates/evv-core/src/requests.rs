//! Request shapes accepted by the lifecycle components.
//!
//! Each request validates itself into a typed form before the service touches
//! storage. Validation never performs I/O.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{ScheduleStatus, TaskStatus};
use crate::errors::ServiceError;
use crate::validation::{non_blank, require_coordinate, require_uuid};

/// Check-in or check-out request for a schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VisitRequest {
    pub id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A [`VisitRequest`] that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidVisit {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
}

impl VisitRequest {
    #[must_use]
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the id is not a UUID or a coordinate is missing.
    pub fn validate(&self) -> Result<ValidVisit, ServiceError> {
        Ok(ValidVisit {
            id: require_uuid("schedule id", &self.id)?,
            latitude: require_coordinate("latitude", self.latitude)?,
            longitude: require_coordinate("longitude", self.longitude)?,
        })
    }
}

/// Administrative status override for a schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SetScheduleStatusRequest {
    pub id: String,
    pub status: String,
}

impl SetScheduleStatusRequest {
    /// A UUID-shaped id is canonicalized like the visit ids; any other
    /// non-blank id is passed through and simply won't be found.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the id is blank or the status is unknown.
    pub fn validate(&self) -> Result<(String, ScheduleStatus), ServiceError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(ServiceError::invalid("schedule id is required"));
        }
        let status = self
            .status
            .parse::<ScheduleStatus>()
            .map_err(|e| ServiceError::invalid(e.to_string()))?;
        let id = Uuid::parse_str(id).map_or_else(|_| id.to_string(), |uuid| uuid.to_string());
        Ok((id, status))
    }
}

/// Status change for a single task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateTaskStatusRequest {
    pub task_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// An [`UpdateTaskStatusRequest`] that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTaskUpdate {
    pub task_id: Uuid,
    pub status: TaskStatus,
    pub reason: Option<String>,
}

impl UpdateTaskStatusRequest {
    #[must_use]
    pub fn new(task_id: impl Into<String>, status: TaskStatus, reason: Option<&str>) -> Self {
        Self {
            task_id: task_id.into(),
            status: status.as_str().to_string(),
            reason: reason.map(String::from),
        }
    }

    /// # Errors
    ///
    /// `InvalidArgument` if the task id is not a UUID, the status is unknown,
    /// or the status requires a reason and none was given.
    pub fn validate(&self) -> Result<ValidTaskUpdate, ServiceError> {
        let task_id = require_uuid("task id", &self.task_id)?;
        if self.status.trim().is_empty() {
            return Err(ServiceError::invalid("status is required"));
        }
        let status = self
            .status
            .parse::<TaskStatus>()
            .map_err(|e| ServiceError::invalid(e.to_string()))?;
        let reason = non_blank(self.reason.as_deref());
        if status.requires_reason() && reason.is_none() {
            return Err(ServiceError::invalid(format!(
                "reason is required when status is {status}"
            )));
        }
        Ok(ValidTaskUpdate {
            task_id,
            status,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ID: &str = "6f1c2b9e-8a4d-4f7e-9b1a-2c3d4e5f6a7b";

    #[test]
    fn visit_request_requires_both_coordinates() {
        assert!(VisitRequest::new(ID, 37.77, -122.41).validate().is_ok());

        let missing = VisitRequest {
            id: ID.into(),
            latitude: Some(37.77),
            longitude: None,
        };
        let err = missing.validate().unwrap_err();
        assert_eq!(err.details().as_deref(), Some("longitude is required"));
    }

    #[test]
    fn visit_request_rejects_bad_id() {
        let err = VisitRequest::new("S1", 1.0, 1.0).validate().unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[test]
    fn not_completed_needs_reason() {
        let req = UpdateTaskStatusRequest::new(ID, TaskStatus::NotCompleted, None);
        assert!(matches!(req.validate(), Err(ServiceError::InvalidArgument(_))));

        let req = UpdateTaskStatusRequest::new(ID, TaskStatus::NotCompleted, Some("   "));
        assert!(matches!(req.validate(), Err(ServiceError::InvalidArgument(_))));

        let req = UpdateTaskStatusRequest::new(ID, TaskStatus::NotCompleted, Some("Client asleep"));
        let valid = req.validate().unwrap();
        assert_eq!(valid.reason.as_deref(), Some("Client asleep"));
    }

    #[test]
    fn unknown_task_status_is_rejected() {
        let req = UpdateTaskStatusRequest {
            task_id: ID.into(),
            status: "done".into(),
            reason: None,
        };
        assert!(matches!(req.validate(), Err(ServiceError::InvalidArgument(_))));
    }

    #[test]
    fn reason_is_optional_for_other_statuses() {
        let valid = UpdateTaskStatusRequest::new(ID, TaskStatus::Completed, None)
            .validate()
            .unwrap();
        assert_eq!(valid.status, TaskStatus::Completed);
        assert_eq!(valid.reason, None);
    }

    #[test]
    fn set_status_parses_schedule_status() {
        let req = SetScheduleStatusRequest {
            id: ID.into(),
            status: "missed".into(),
        };
        assert_eq!(req.validate().unwrap().1, ScheduleStatus::Missed);

        let req = SetScheduleStatusRequest {
            id: ID.into(),
            status: "in_progress".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn set_status_canonicalizes_uuid_ids() {
        let req = SetScheduleStatusRequest {
            id: format!(" {{{}}} ", ID.to_uppercase()),
            status: "completed".into(),
        };
        assert_eq!(req.validate().unwrap().0, ID);

        let req = SetScheduleStatusRequest {
            id: "legacy-7".into(),
            status: "completed".into(),
        };
        assert_eq!(req.validate().unwrap().0, "legacy-7");
    }
}
