// Authentication middleware (access gate)
// Decision: Raw token in a custom header, no "Bearer" scheme
// Decision: Guards are composable middleware; claims travel in request extensions
// Decision: The premium guard fails closed when no claims are attached

use anyhow::{Context, Result};
use axum::{
    extract::{Request, State},
    http::HeaderName,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::{
    config::AuthConfig,
    jwt::{JwtService, SessionClaims},
};
use crate::api::ApiError;
use crate::storage::{PasswordService, StorageBackend};

/// Auth state shared across routes
#[derive(Clone)]
pub struct AuthState {
    pub config: Arc<AuthConfig>,
    /// Parsed `AuthConfig::token_header`
    pub token_header: HeaderName,
    pub jwt_service: Arc<JwtService>,
    pub passwords: PasswordService,
    pub db: StorageBackend,
}

impl AuthState {
    pub fn new(config: AuthConfig, db: StorageBackend) -> Result<Self> {
        let token_header = HeaderName::try_from(config.token_header.as_str())
            .with_context(|| {
                format!(
                    "AUTH_TOKEN_HEADER {:?} is not a valid header name",
                    config.token_header
                )
            })?;
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        let passwords = PasswordService::new(&config.password)?;
        Ok(Self {
            config: Arc::new(config),
            token_header,
            jwt_service,
            passwords,
            db,
        })
    }
}

/// Authenticated guard: verifies the session token and attaches its claims
pub async fn require_login(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get(&state.token_header)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::NotLoggedIn)?;

    let claims = state
        .jwt_service
        .validate_session_token(token)
        .map_err(|e| {
            tracing::debug!("Session token rejected: {}", e);
            ApiError::NotLoggedIn
        })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Premium guard: lets the request through only for premium claims.
/// Expects `require_login` to have run first.
pub async fn require_premium(req: Request, next: Next) -> Result<Response, ApiError> {
    let claims = extract_claims(&req).ok_or_else(|| {
        tracing::warn!("Premium guard reached without session claims");
        ApiError::NotLoggedIn
    })?;

    if !claims.is_premium {
        return Err(ApiError::NotPremium);
    }

    Ok(next.run(req).await)
}

/// Extract claims from request (use after `require_login`)
pub fn extract_claims(req: &Request) -> Option<&SessionClaims> {
    req.extensions().get::<SessionClaims>()
}
