// Server configuration loading
//
// Process-level settings (listen port, storage, CORS, log filter). Auth settings
// live in `auth::config`.
// Decision: CORS_ALLOWED_ORIGINS="*" opens CORS to every origin

use axum::http::HeaderValue;
use tower_http::cors::AllowOrigin;

pub const DEFAULT_PORT: u16 = 9000;
pub const DEFAULT_LOG_FILTER: &str = "tiergate_server=debug,tower_http=debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port to listen on (all interfaces)
    pub port: u16,
    /// PostgreSQL connection string; in-memory storage when unset
    pub database_url: Option<String>,
    /// Origins allowed by CORS
    pub cors_origins: CorsOrigins,
    /// tracing EnvFilter directive
    pub log_filter: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_url = lookup("DATABASE_URL").filter(|s| !s.is_empty());

        // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
        // CORS_ALLOWED_ORIGINS="*" allows any origin
        let cors_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|s| CorsOrigins::parse(&s))
            .unwrap_or_default();

        let log_filter = lookup("RUST_LOG")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            port,
            database_url,
            cors_origins,
            log_filter,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Cross-origin policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsOrigins {
    /// No CORS layer (same-origin requests only)
    #[default]
    Disabled,
    /// Every origin is allowed
    Any,
    /// Only the listed origins are allowed
    List(Vec<String>),
}

impl CorsOrigins {
    /// Parse a comma-separated origin list; a `*` entry allows any origin
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        if origins.iter().any(|o| o == "*") {
            Self::Any
        } else if origins.is_empty() {
            Self::Disabled
        } else {
            Self::List(origins)
        }
    }

    /// tower-http origin policy, `None` when CORS is disabled.
    /// Entries that are not valid header values are skipped.
    pub fn allow_origin(&self) -> Option<AllowOrigin> {
        match self {
            Self::Disabled => None,
            Self::Any => Some(AllowOrigin::any()),
            Self::List(origins) => {
                let values: Vec<HeaderValue> = origins
                    .iter()
                    .filter_map(|o| match o.parse() {
                        Ok(value) => Some(value),
                        Err(_) => {
                            tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                            None
                        }
                    })
                    .collect();
                Some(AllowOrigin::list(values))
            }
        }
    }
}
