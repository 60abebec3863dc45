//! Error taxonomy surfaced by the lifecycle components.
//!
//! Storage-level failures (`DatabaseError` in `evv-db`) never reach callers
//! directly: the service layer logs them and maps them onto one of these
//! kinds. Only human-readable text leaves this type; raw driver errors stay
//! in the logs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classification of a [`ServiceError`], independent of its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Conflict,
    Internal,
    RequestCancelled,
    RequestTimedOut,
}

impl ErrorKind {
    /// HTTP-equivalent status code, used as the `code` of error envelopes.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::InvalidArgument => 400,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
            Self::RequestCancelled => 503,
            Self::RequestTimedOut => 504,
        }
    }

    /// Short title used as the envelope `message`.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::InvalidArgument => "Bad request",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Conflict",
            Self::Internal => "Internal server error",
            Self::RequestCancelled => "Request cancelled",
            Self::RequestTimedOut => "Request timed out",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Errors returned by schedule and task operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed structural validation. Raised before any storage access.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No row exists for the requested id.
    #[error("{entity_type} with ID {id} not found")]
    NotFound { entity_type: &'static str, id: String },

    /// The requested transition is not legal from the current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Storage or otherwise unclassified failure. The cause is logged, not carried.
    #[error("Internal error during {operation}")]
    Internal { operation: &'static str },

    /// The caller cancelled the request while it was in flight.
    #[error("Request cancelled")]
    RequestCancelled,

    /// The request deadline elapsed while it was in flight.
    #[error("Request timed out")]
    RequestTimedOut,
}

impl ServiceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Internal { .. } => ErrorKind::Internal,
            Self::RequestCancelled => ErrorKind::RequestCancelled,
            Self::RequestTimedOut => ErrorKind::RequestTimedOut,
        }
    }

    /// Caller-safe detail text for the error envelope.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        match self {
            Self::InvalidArgument(msg) | Self::Conflict(msg) => Some(msg.clone()),
            Self::NotFound { .. } => Some(self.to_string()),
            Self::Internal { .. } => None,
            Self::RequestCancelled => Some("The client cancelled the request.".to_string()),
            Self::RequestTimedOut => Some("The request exceeded its allotted time.".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kinds_map_to_status_codes() {
        assert_eq!(ServiceError::invalid("x").kind().status_code(), 400);
        assert_eq!(ServiceError::not_found("Task", "t").kind().status_code(), 404);
        assert_eq!(ServiceError::conflict("x").kind().status_code(), 409);
        assert_eq!(
            ServiceError::Internal { operation: "get_schedule" }
                .kind()
                .status_code(),
            500
        );
        assert_eq!(ServiceError::RequestCancelled.kind().status_code(), 503);
        assert_eq!(ServiceError::RequestTimedOut.kind().status_code(), 504);
    }

    #[test]
    fn internal_error_hides_details() {
        let err = ServiceError::Internal {
            operation: "update_task_status",
        };
        assert_eq!(err.details(), None);
        assert_eq!(err.kind().title(), "Internal server error");
    }

    #[test]
    fn not_found_names_entity_and_id() {
        let err = ServiceError::not_found("Schedule", "abc");
        assert_eq!(err.details().as_deref(), Some("Schedule with ID abc not found"));
    }
}
