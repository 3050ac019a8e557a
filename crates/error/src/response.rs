//! API Response Envelope
//!
//! Every endpoint responds with the same JSON shape:
//!
//! ```json
//! { "message": "...", "data": { ... }, "error": "...", "errors": [{ "path": "...", "message": "..." }] }
//! ```
//!
//! `data` appears on success, `error`/`errors` on failure.

use axum::{body::Body, response::Response};
use serde::{Deserialize, Serialize};

use crate::AppError;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path of the offending field (e.g. `address.city`).
    pub path:    String,
    pub message: String,
}

/// Pagination block returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page:  u64,
    pub limit: u64,
    /// `ceil(total / limit)`.
    pub pages: u64,
}

impl Pagination {
    /// Create pagination metadata for a page of results.
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        let pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            total,
            page,
            limit,
            pages,
        }
    }

    /// Offset into the result set for this page (1-indexed pages).
    pub fn offset(&self) -> u64 { self.page.saturating_sub(1).saturating_mul(self.limit) }
}

/// The fixed response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success envelope with a payload.
    pub fn ok(message: impl ToString, data: T) -> Self {
        Self {
            message: message.to_string(),
            data:    Some(data),
            error:   None,
            errors:  None,
        }
    }
}

impl ApiResponse<()> {
    /// Success envelope carrying only a message.
    pub fn message(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
            data:    None,
            error:   None,
            errors:  None,
        }
    }

    /// Error envelope with a leading message and optional detail.
    pub fn failure(message: impl ToString, error: Option<String>, errors: Option<Vec<FieldError>>) -> Self {
        Self {
            message: message.to_string(),
            data:    None,
            error,
            errors,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // 500-class detail is only surfaced in debug builds; released servers
        // respond with a generic message.
        let envelope = match &self {
            AppError::Validation { errors } => {
                ApiResponse::failure("Validation failed", None, Some(errors.clone()))
            },
            _ if status.is_server_error() => {
                let detail = if cfg!(debug_assertions) {
                    Some(self.message())
                }
                else {
                    None
                };
                ApiResponse::failure("Internal server error", detail, None)
            },
            _ => ApiResponse::failure(self.message(), None, None),
        };

        let body = serde_json::to_string(&envelope).unwrap_or_else(|_| {
            "{\"message\":\"Internal server error\"}".to_string()
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap_or_else(|_| Response::new(Body::empty()))
    }
}
