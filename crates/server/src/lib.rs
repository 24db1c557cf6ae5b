// Tiergate Server Library
// Decision: Shared library for binaries (API server, OpenAPI export) and router tests

use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// API routes and types
pub mod api;

// Authentication module
pub mod auth;

// Process configuration
pub mod config;

// Storage layer
pub mod storage;

// OpenAPI spec generation
pub mod openapi;

pub use auth::AuthState;

/// Build the full application router (CORS is layered on by the binary)
pub fn build_router(state: AuthState) -> Router {
    Router::new()
        .merge(api::health::routes(state.clone()))
        .merge(api::pages::routes(state.clone()))
        .merge(auth::routes(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", openapi::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
