// Authentication configuration loaded from environment variables.
// Decision: AUTH_ prefix for all auth config, JWT_SECRET accepted as a fallback
// Decision: Generate a throwaway secret when none is configured (dev mode only)

use std::time::Duration;

/// Header carrying the raw session token (no "Bearer" scheme)
pub const DEFAULT_TOKEN_HEADER: &str = "jwtoken";

/// Default session token lifetime
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(60);

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWTs
    pub secret: String,
    /// Session token lifetime
    pub token_lifetime: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_lifetime: DEFAULT_TOKEN_LIFETIME,
        }
    }
}

/// Argon2id work factor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Request header the session token is read from
    pub token_header: String,
    /// Password hashing work factor
    pub password: PasswordConfig,
    /// Require login for tier changes (callers may only change their own tier)
    pub protect_subscribe: bool,
    /// True when no secret was configured and a random one was generated
    pub secret_generated: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            token_header: DEFAULT_TOKEN_HEADER.to_string(),
            password: PasswordConfig::default(),
            protect_subscribe: false,
            secret_generated: false,
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let configured_secret = lookup("AUTH_JWT_SECRET")
            .or_else(|| lookup("JWT_SECRET"))
            .filter(|s| !s.is_empty());

        let secret_generated = configured_secret.is_none();
        let secret = configured_secret.unwrap_or_else(|| {
            use rand::Rng;
            let bytes: [u8; 32] = rand::thread_rng().gen();
            hex::encode(bytes)
        });

        // A zero lifetime would issue tokens that are already expired
        let token_lifetime = lookup("AUTH_JWT_TOKEN_LIFETIME")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_LIFETIME);

        let token_header = lookup("AUTH_TOKEN_HEADER")
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_HEADER.to_string());

        let defaults = PasswordConfig::default();
        let password = PasswordConfig {
            memory_kib: parse_or(&lookup, "AUTH_PASSWORD_MEMORY_KIB", defaults.memory_kib),
            iterations: parse_or(&lookup, "AUTH_PASSWORD_ITERATIONS", defaults.iterations),
            parallelism: parse_or(&lookup, "AUTH_PASSWORD_PARALLELISM", defaults.parallelism),
        };

        let protect_subscribe = lookup("AUTH_PROTECT_SUBSCRIBE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "on" | "ON"))
            .unwrap_or(false);

        Self {
            jwt: JwtConfig {
                secret,
                token_lifetime,
            },
            token_header,
            password,
            protect_subscribe,
            secret_generated,
        }
    }
}

fn parse_or<F>(lookup: &F, key: &str, default: u32) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.parse().ok()).unwrap_or(default)
}
