// Page routes
// Decision: /dashboard sits behind the login guard, /premium behind login + premium

use axum::{middleware, routing::get, Router};

use super::common::ApiResponse;
use crate::auth::middleware::{require_login, require_premium, AuthState};

/// Create page routes
pub fn routes(state: AuthState) -> Router {
    let premium = Router::new()
        .route("/premium", get(premium))
        .route_layer(middleware::from_fn(require_premium));

    // route_layer wraps everything registered so far, so login runs before premium
    let members = Router::new()
        .route("/dashboard", get(dashboard))
        .merge(premium)
        .route_layer(middleware::from_fn_with_state(state, require_login));

    Router::new().route("/", get(index)).merge(members)
}

/// GET / - Public welcome
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome message", body = ApiResponse)),
    tag = "pages"
)]
pub async fn index() -> ApiResponse {
    ApiResponse::success("Welcome")
}

/// GET /dashboard - Requires a valid session token
#[utoipa::path(
    get,
    path = "/dashboard",
    params(
        ("jwtoken" = String, Header, description = "Session token (default header name, renamed by AUTH_TOKEN_HEADER)")
    ),
    responses((status = 200, description = "Welcome message, or FAILED when not logged in", body = ApiResponse)),
    tag = "pages"
)]
pub async fn dashboard() -> ApiResponse {
    ApiResponse::success("Welcome to dashboard!")
}

/// GET /premium - Requires a valid session token with the premium tier
#[utoipa::path(
    get,
    path = "/premium",
    params(
        ("jwtoken" = String, Header, description = "Session token (default header name, renamed by AUTH_TOKEN_HEADER)")
    ),
    responses((status = 200, description = "Welcome message, or FAILED when not logged in / not premium", body = ApiResponse)),
    tag = "pages"
)]
pub async fn premium() -> ApiResponse {
    ApiResponse::success("Welcome to Premium page!")
}
