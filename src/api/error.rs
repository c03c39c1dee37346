//! API error responses
//!
//! Two kinds reach the client: 404 for an unknown task id and 422 for a
//! request body that fails to parse or validate. A body that cannot be read
//! at all (over the size limit) keeps axum's own status, usually 413.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::TaskboardError;

/// JSON error body
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// "NOT_FOUND" | "VALIDATION_ERROR" | "PAYLOAD_TOO_LARGE" | "BAD_REQUEST" | "INTERNAL_ERROR"
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Validation failure for a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Status code plus error body
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// 404 naming the missing task
    pub fn task_not_found(id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: ApiError {
                code: "NOT_FOUND",
                message: format!("Task with ID '{}' not found", id),
                details: None,
            },
        }
    }

    /// 422 with field details
    pub fn validation(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: ApiError {
                code: "VALIDATION_ERROR",
                message: message.into(),
                details: Some(details),
            },
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: ApiError {
                code: "INTERNAL_ERROR",
                message: message.into(),
                details: None,
            },
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        match rejection {
            // The body never arrived (size limit, broken stream): keep axum's status.
            JsonRejection::BytesRejection(_) => {
                let status = rejection.status();
                let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "PAYLOAD_TOO_LARGE"
                } else {
                    "BAD_REQUEST"
                };
                Self {
                    status,
                    error: ApiError {
                        code,
                        message: rejection.body_text(),
                        details: None,
                    },
                }
            }
            _ => Self::validation(
                "Invalid request body",
                vec![FieldError::new("body", rejection.body_text())],
            ),
        }
    }
}

impl From<TaskboardError> for ApiErrorResponse {
    fn from(err: TaskboardError) -> Self {
        let message = err.to_string();
        match err {
            TaskboardError::NotFound(id) => Self::task_not_found(&id),
            TaskboardError::InvalidPriority(_) => Self::validation(
                "Validation failed",
                vec![FieldError::new("priority", message)],
            ),
            _ => {
                tracing::error!(error = %message, "internal error");
                Self::internal("An internal error occurred")
            }
        }
    }
}
