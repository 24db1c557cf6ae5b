// Storage layer for the credential store
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// - Database: sqlx-backed users repository
// - InMemoryDatabase: HashMap-backed users repository for dev and tests
// - StorageBackend: enum dispatch over the two
// - PasswordService: Argon2id hashing for stored credentials

pub mod backend;
pub mod memory;
pub mod models;
pub mod password;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use password::PasswordService;
pub use repositories::Database;
