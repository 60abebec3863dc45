//! Response envelopes returned by the presentation adapter.
//!
//! Every operation answers with `{success, message, data?, error?}`. The
//! schedule list adds a `pagination` block and carries the page rows as
//! `data`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::filter::Page;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Operation successful";

/// Error payload of a failed envelope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&ServiceError> for ErrorBody {
    fn from(err: &ServiceError) -> Self {
        let kind = err.kind();
        Self {
            code: kind.status_code(),
            message: kind.title().to_string(),
            details: err.details(),
        }
    }
}

/// Standard response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub fn ok(data: T, message: &str) -> Self {
        Self {
            success: true,
            message: success_message(message),
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub fn error(err: &ServiceError) -> Self {
        let body = ErrorBody::from(err);
        Self {
            success: false,
            message: body.message.clone(),
            data: None,
            error: Some(body),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload (visit start/end, status updates).
    #[must_use]
    pub fn done(message: &str) -> Self {
        Self {
            success: true,
            message: success_message(message),
            data: None,
            error: None,
        }
    }
}

/// Pagination block of a [`PaginatedResponse`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Envelope for paginated lists.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> PaginatedResponse<T> {
    #[must_use]
    pub fn ok(page: Page<T>, message: &str) -> Self {
        let pagination = Pagination {
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
        };
        Self {
            success: true,
            message: success_message(message),
            data: Some(page.data),
            error: None,
            pagination: Some(pagination),
        }
    }
}

fn success_message(message: &str) -> String {
    if message.is_empty() {
        DEFAULT_SUCCESS_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ScheduleFilter;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn done_envelope_omits_data_and_error() {
        let value = serde_json::to_value(ApiResponse::done("Visit started successfully")).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "message": "Visit started successfully"})
        );
    }

    #[test]
    fn empty_message_falls_back_to_default() {
        let resp = ApiResponse::ok(1, "");
        assert_eq!(resp.message, DEFAULT_SUCCESS_MESSAGE);
    }

    #[test]
    fn error_envelope_carries_code_and_details() {
        let err = ServiceError::conflict("Visit for schedule ID x is already in-progress. Cannot start.");
        let value = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(
            value,
            json!({
                "success": false,
                "message": "Conflict",
                "error": {
                    "code": 409,
                    "message": "Conflict",
                    "details": "Visit for schedule ID x is already in-progress. Cannot start."
                }
            })
        );
    }

    #[test]
    fn paginated_envelope_for_empty_store() {
        let query = ScheduleFilter::default().normalize().unwrap();
        let page: Page<String> = Page::new(Vec::new(), &query, 0);
        let value =
            serde_json::to_value(PaginatedResponse::ok(page, "Schedules retrieved successfully"))
                .unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "message": "Schedules retrieved successfully",
                "data": [],
                "pagination": {"page": 1, "page_size": 10, "total_items": 0, "total_pages": 0}
            })
        );
    }

    #[test]
    fn envelopes_deserialize_without_payload_default() {
        let err: ApiResponse<Pagination> = serde_json::from_value(json!({
            "success": false,
            "message": "Not Found",
            "error": {"code": 404, "message": "Not Found", "details": null}
        }))
        .unwrap();
        assert_eq!(err.data, None);
        assert_eq!(err.error.map(|e| e.code), Some(404));

        let page: PaginatedResponse<Pagination> = serde_json::from_value(json!({
            "success": true,
            "message": "Schedules retrieved successfully",
            "data": []
        }))
        .unwrap();
        assert_eq!(page.data, Some(Vec::new()));
        assert_eq!(page.pagination, None);
    }
}
