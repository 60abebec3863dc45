//! Mapping from storage failures to caller-facing errors.
//!
//! Raw driver text is logged here and never copied into the returned
//! [`ServiceError`].

use evv_core::errors::ServiceError;
use evv_db::error::DatabaseError;

/// Map a failure from a list or update call, where "no rows" is not expected.
pub(crate) fn storage_failure(operation: &'static str, err: DatabaseError) -> ServiceError {
    match err {
        DatabaseError::Cancelled => {
            tracing::warn!(operation, "request cancelled during storage call");
            ServiceError::RequestCancelled
        }
        DatabaseError::TimedOut => {
            tracing::warn!(operation, "request timed out during storage call");
            ServiceError::RequestTimedOut
        }
        other => {
            tracing::error!(operation, error = %other, "storage call failed");
            ServiceError::Internal { operation }
        }
    }
}

/// Map a failure from a point lookup, where "no rows" means the id is unknown.
pub(crate) fn lookup_failure(
    operation: &'static str,
    entity_type: &'static str,
    id: &str,
    err: DatabaseError,
) -> ServiceError {
    match err {
        DatabaseError::NoResult => {
            tracing::info!(operation, entity = entity_type, id, "not found");
            ServiceError::not_found(entity_type, id)
        }
        other => storage_failure(operation, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evv_core::errors::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_result_becomes_not_found() {
        let err = lookup_failure("get_schedule", "Schedule", "abc", DatabaseError::NoResult);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.details().as_deref(), Some("Schedule with ID abc not found"));
    }

    #[test]
    fn interruptions_keep_their_kind() {
        assert_eq!(
            storage_failure("list_schedules", DatabaseError::Cancelled).kind(),
            ErrorKind::RequestCancelled
        );
        assert_eq!(
            lookup_failure("get_task", "Task", "t", DatabaseError::TimedOut).kind(),
            ErrorKind::RequestTimedOut
        );
    }

    #[test]
    fn driver_errors_are_opaque() {
        let err = storage_failure(
            "list_schedules",
            DatabaseError::Query("no such column: shift".into()),
        );
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.details(), None);
        assert!(!err.to_string().contains("shift"));
    }
}
