// OpenAPI specification generation
//
// This module defines the OpenAPI spec for the Tiergate API.
// It can be used by both the server (for Swagger UI)
// and the export-openapi binary (for static spec generation).

use crate::api;
use crate::auth;
use utoipa::OpenApi;

/// OpenAPI documentation for the Tiergate API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::pages::index,
        api::pages::dashboard,
        api::pages::premium,
        api::health::health,
        auth::routes::signup,
        auth::routes::login,
        auth::routes::subscribe_premium,
    ),
    components(
        schemas(
            api::ApiResponse,
            api::ApiStatus,
            api::health::HealthResponse,
            auth::routes::SignupRequest,
            auth::routes::LoginRequest,
            auth::routes::SubscribeRequest,
        )
    ),
    tags(
        (name = "pages", description = "Public and tier-gated pages"),
        (name = "auth", description = "Signup, login and subscription endpoints"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Tiergate API",
        version = "0.1.0",
        description = "User signup, login and premium-tier access checks",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> String {
        Self::openapi()
            .to_pretty_json()
            .expect("Failed to serialize OpenAPI spec")
    }
}
