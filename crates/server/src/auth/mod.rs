// Authentication module
//
// - config: AuthConfig loaded from the environment
// - jwt: session token issuing and verification
// - middleware: AuthState plus the login and premium guards
// - routes: signup, login and tier upgrade handlers

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod routes;

pub use config::AuthConfig;
pub use jwt::{JwtService, SessionClaims, TokenError};
pub use middleware::AuthState;
pub use routes::routes;
