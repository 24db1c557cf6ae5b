// HTTP API routes
//
// Page and health routes live here; signup/login/tier routes live in `auth::routes`.

pub mod body;
pub mod common;
pub mod error;
pub mod health;
pub mod pages;

// Re-export common types
pub use body::JsonOrForm;
pub use common::{ApiResponse, ApiStatus};
pub use error::{present, required, ApiError};
