// Common DTOs for public API
//
// Every endpoint answers HTTP 200 with the same envelope; success and failure
// are told apart by the `status` field, not by the status code.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome marker carried by every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiStatus {
    Success,
    Failed,
}

/// Standard response envelope for API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse {
    /// `SUCCESS` or `FAILED`.
    pub status: ApiStatus,
    /// Human readable outcome.
    #[schema(example = "Welcome")]
    pub message: String,
    /// Signed session token (login only).
    #[serde(rename = "jwToken", skip_serializing_if = "Option::is_none", default)]
    pub jw_token: Option<String>,
    /// Token lifetime in seconds (login only).
    #[serde(rename = "expiresIn", skip_serializing_if = "Option::is_none", default)]
    pub expires_in: Option<i64>,
}

impl ApiResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ApiStatus::Success,
            message: message.into(),
            jw_token: None,
            expires_in: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: ApiStatus::Failed,
            message: message.into(),
            jw_token: None,
            expires_in: None,
        }
    }

    /// Attach an issued session token
    pub fn with_token(mut self, token: String, expires_in: i64) -> Self {
        self.jw_token = Some(token);
        self.expires_in = Some(expires_in);
        self
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
