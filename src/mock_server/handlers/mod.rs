//! HTTP request handlers for the mock server.
//!
//! Every handler answers with the lawg envelope: `{"success": true, "data": ...}`
//! on success, `{"success": false, "error": {"code", "message"}}` on failure,
//! and an empty 204 for deletes.

pub mod feeds;
pub mod insights;
pub mod logs;
pub mod projects;

pub use feeds::*;
pub use insights::*;
pub use logs::*;
pub use projects::*;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{HttpErrorKind, DEFAULT_LIMIT, DEFAULT_OFFSET};

/// Result type returned by every handler.
pub type ApiResult<T = Response> = std::result::Result<T, ApiError>;

/// An error rendered as the failure envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: HttpErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: HttpErrorKind, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, HttpErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, HttpErrorKind::Conflict, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, HttpErrorKind::BadRequest, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            HttpErrorKind::Unauthorized,
            "Invalid or missing API token",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "error": {
                "code": self.kind.as_code(),
                "message": self.message,
            }
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

/// Wrap `data` in the success envelope.
pub fn ok<T: Serialize>(status: StatusCode, data: T) -> Response {
    let body = serde_json::json!({ "success": true, "data": data });
    (status, Json(body)).into_response()
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// `limit` and `offset` query parameters of list endpoints.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct PageQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl PageQuery {
    /// Slice out the requested page.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT) as usize;
        let offset = self.offset.unwrap_or(DEFAULT_OFFSET) as usize;
        items.iter().skip(offset).take(limit).cloned().collect()
    }
}
