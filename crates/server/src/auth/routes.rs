// Authentication HTTP routes
// Decision: Every outcome is a 200 JSON envelope, failures carry a stable message
// Decision: Email uniqueness is enforced at signup
// Decision: Tier upgrade is open by default; AUTH_PROTECT_SUBSCRIBE puts it behind login
// Decision: Bodies are accepted as JSON or as urlencoded HTML forms
// Decision: Passwords are taken verbatim; only name and email must be non-blank

use axum::{
    extract::State,
    middleware,
    routing::{patch, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::{
    jwt::SessionClaims,
    middleware::{require_login, AuthState},
};
use crate::api::{present, required, ApiError, ApiResponse, JsonOrForm};
use crate::storage::CreateUserRow;

/// Signup request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(alias = "fullname")]
    #[schema(example = "Ada Lovelace")]
    pub full_name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
    /// Initial tier, defaults to false
    pub is_premium: Option<bool>,
}

/// Login request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Tier upgrade request
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    pub is_premium: Option<bool>,
}

/// Create auth routes
pub fn routes(state: AuthState) -> Router {
    let subscribe = Router::new().route("/subscribePremium", patch(subscribe_premium));
    let subscribe = if state.config.protect_subscribe {
        subscribe.route_layer(middleware::from_fn_with_state(state.clone(), require_login))
    } else {
        subscribe
    };

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .merge(subscribe)
        .with_state(state)
}

/// POST /signup - Register a new user
#[utoipa::path(
    post,
    path = "/signup",
    request_body(content(
        (SignupRequest = "application/json"),
        (SignupRequest = "application/x-www-form-urlencoded")
    )),
    responses(
        (status = 200, description = "SUCCESS, or FAILED on duplicate email / missing field", body = ApiResponse)
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AuthState>,
    JsonOrForm(req): JsonOrForm<SignupRequest>,
) -> Result<ApiResponse, ApiError> {
    let full_name = required(req.full_name, "fullName")?;
    let email = required(req.email, "email")?;
    let password = present(req.password, "password")?;

    if state.db.get_user_by_email(&email).await?.is_some() {
        return Err(ApiError::EmailTaken);
    }

    let password_hash = state.passwords.hash_password_blocking(password).await?;

    let user = state
        .db
        .create_user(CreateUserRow {
            full_name,
            email,
            password_hash,
            is_premium: req.is_premium.unwrap_or(false),
        })
        .await?;

    tracing::info!(user_id = %user.id, is_premium = user.is_premium, "User signed up");

    Ok(ApiResponse::success("You've signed up successfully"))
}

/// POST /login - Login with email and password
#[utoipa::path(
    post,
    path = "/login",
    request_body(content(
        (LoginRequest = "application/json"),
        (LoginRequest = "application/x-www-form-urlencoded")
    )),
    responses(
        (status = 200, description = "SUCCESS with jwToken, or FAILED", body = ApiResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AuthState>,
    JsonOrForm(req): JsonOrForm<LoginRequest>,
) -> Result<ApiResponse, ApiError> {
    let email = required(req.email, "email")?;
    let password = present(req.password, "password")?;

    let user = state
        .db
        .get_user_by_email(&email)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    let valid = state
        .passwords
        .verify_password_blocking(password, user.password_hash.clone())
        .await?;

    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.jwt_service.generate_session_token(&user)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(ApiResponse::success("You've logged in successfully")
        .with_token(token, state.jwt_service.token_lifetime_secs()))
}

/// PATCH /subscribePremium - Change a user's tier
///
/// Tokens issued before the change keep the tier they were issued with.
#[utoipa::path(
    patch,
    path = "/subscribePremium",
    request_body(content(
        (SubscribeRequest = "application/json"),
        (SubscribeRequest = "application/x-www-form-urlencoded")
    )),
    params(
        ("jwtoken" = Option<String>, Header, description = "Session token, required when AUTH_PROTECT_SUBSCRIBE is on (default header name, renamed by AUTH_TOKEN_HEADER)")
    ),
    responses(
        (status = 200, description = "SUCCESS, or FAILED when the user does not exist", body = ApiResponse)
    ),
    tag = "auth"
)]
pub async fn subscribe_premium(
    State(state): State<AuthState>,
    claims: Option<Extension<SessionClaims>>,
    JsonOrForm(req): JsonOrForm<SubscribeRequest>,
) -> Result<ApiResponse, ApiError> {
    let email = required(req.email, "email")?;
    let is_premium = req.is_premium.ok_or(ApiError::MissingField("isPremium"))?;

    let user = state
        .db
        .get_user_by_email(&email)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    if let Some(Extension(claims)) = claims {
        if claims.sub != user.id.to_string() {
            return Err(ApiError::Forbidden);
        }
    }

    let updated = state
        .db
        .update_user_tier(user.id, is_premium)
        .await?
        .ok_or(ApiError::UserNotFound)?;

    tracing::info!(user_id = %updated.id, is_premium = updated.is_premium, "User tier changed");

    Ok(ApiResponse::success("You've subscribed successfully"))
}
