// Tiergate API server
// Decision: In-memory storage when DATABASE_URL is unset (dev mode), PostgreSQL otherwise
// Decision: A generated signing secret is only acceptable in dev mode

use anyhow::{bail, Context, Result};
use axum::http::{HeaderName, Method};
use axum::Router;
use tiergate_server::{
    auth::{AuthConfig, AuthState},
    build_router,
    config::{CorsOrigins, ServerConfig},
    storage::StorageBackend,
};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a local .env if present; real environment wins
    let _ = dotenvy::dotenv();

    let config = ServerConfig::from_env();

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(filter)
        .init();

    tracing::info!("tiergate-server starting...");

    // Initialize storage
    let db = match &config.database_url {
        Some(url) => {
            let db = StorageBackend::postgres(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");
            db
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage (data is lost on restart)");
            StorageBackend::in_memory()
        }
    };

    // Load authentication configuration
    let auth_config = AuthConfig::from_env();
    if auth_config.secret_generated {
        if !db.is_dev_mode() {
            bail!("AUTH_JWT_SECRET (or JWT_SECRET) must be set when using PostgreSQL storage");
        }
        tracing::warn!("AUTH_JWT_SECRET not set, using a random per-process secret");
    }
    tracing::info!(
        storage = db.kind(),
        token_header = %auth_config.token_header,
        token_lifetime_secs = auth_config.jwt.token_lifetime.as_secs(),
        protect_subscribe = auth_config.protect_subscribe,
        "Authentication configured"
    );

    let auth_state =
        AuthState::new(auth_config, db).context("Failed to initialize authentication")?;
    let token_header = auth_state.token_header.clone();

    let app = with_cors(build_router(auth_state), &config.cors_origins, token_header);

    // Start HTTP server
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Server running on http://localhost:{}", config.port);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Add a CORS layer only if origins are configured
fn with_cors(app: Router, origins: &CorsOrigins, token_header: HeaderName) -> Router {
    let Some(allow_origin) = origins.allow_origin() else {
        tracing::info!("CORS not configured (same-origin requests only)");
        return app;
    };
    tracing::info!(origins = ?origins, "CORS origins configured");

    app.layer(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
                axum::http::header::ORIGIN,
                token_header,
            ]),
    )
}
