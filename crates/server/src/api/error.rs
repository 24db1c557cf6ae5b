// API error kinds
// Decision: Each failure kind maps to one stable public message
// Decision: Internal causes are logged, never returned to the client

use axum::response::{IntoResponse, Response};

use super::common::ApiResponse;

pub const MSG_SOMETHING_WENT_WRONG: &str = "Something went wrong";
pub const MSG_USER_NOT_FOUND: &str = "User does not exist";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MSG_NOT_LOGGED_IN: &str = "You're not logged in";
pub const MSG_NOT_PREMIUM: &str = "You're not a Premium user! Buy a premium plan";
pub const MSG_EMAIL_TAKEN: &str = "Email already registered";
pub const MSG_INVALID_BODY: &str = "Invalid request body";
pub const MSG_FORBIDDEN: &str = "You can only change your own subscription";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("email already registered")]
    EmailTaken,
    #[error("user does not exist")]
    UserNotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("not logged in")]
    NotLoggedIn,
    #[error("premium tier required")]
    NotPremium,
    #[error("caller may not act on another user")]
    Forbidden,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Message shown to the client
    pub fn public_message(&self) -> String {
        match self {
            ApiError::MissingField(field) => format!("Missing required field: {}", field),
            ApiError::InvalidBody(_) => MSG_INVALID_BODY.to_string(),
            ApiError::EmailTaken => MSG_EMAIL_TAKEN.to_string(),
            ApiError::UserNotFound => MSG_USER_NOT_FOUND.to_string(),
            ApiError::InvalidCredentials => MSG_INVALID_CREDENTIALS.to_string(),
            ApiError::NotLoggedIn => MSG_NOT_LOGGED_IN.to_string(),
            ApiError::NotPremium => MSG_NOT_PREMIUM.to_string(),
            ApiError::Forbidden => MSG_FORBIDDEN.to_string(),
            ApiError::Internal(_) => MSG_SOMETHING_WENT_WRONG.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(e) => tracing::error!(error = ?e, "Request failed"),
            other => tracing::debug!(reason = %other, "Request rejected"),
        }
        ApiResponse::failed(self.public_message()).into_response()
    }
}

/// Require a non-blank string field
pub fn required(value: Option<String>, field: &'static str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ApiError::MissingField(field))
}

/// Require a non-empty string field, taken verbatim (whitespace is significant)
pub fn present(value: Option<String>, field: &'static str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingField(field))
}
