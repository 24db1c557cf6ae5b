// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// This implementation provides a PostgreSQL-compatible API backed by an
// in-memory HashMap, allowing the server to run without a database.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::models::*;

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    users: RwLock<HashMap<Uuid, UserRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        // Hold the write lock across the check so concurrent signups can't both pass it
        let mut users = self.users.write();
        if users.values().any(|u| u.email == input.email) {
            bail!("duplicate key value violates unique constraint \"users_email_key\"");
        }

        let now = Self::now();
        let id = Uuid::now_v7();
        let row = UserRow {
            id,
            full_name: input.full_name,
            email: input.email,
            password_hash: input.password_hash,
            is_premium: input.is_premium,
            created_at: now,
            updated_at: now,
        };
        users.insert(id, row.clone());
        Ok(row)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    pub async fn update_user_tier(&self, id: Uuid, is_premium: bool) -> Result<Option<UserRow>> {
        let mut users = self.users.write();
        if let Some(user) = users.get_mut(&id) {
            user.is_premium = is_premium;
            user.updated_at = Self::now();
            return Ok(Some(user.clone()));
        }
        Ok(None)
    }
}
