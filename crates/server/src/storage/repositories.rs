// PostgreSQL repositories
// Decision: Plain sqlx::query_as with runtime binding (no compile-time checked macros)
// Decision: Migrations are embedded and applied on connect

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::*;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL and bring the schema up to date
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(Self { pool })
    }

    // ============================================
    // Users
    // ============================================

    pub async fn create_user(&self, input: CreateUserRow) -> Result<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, full_name, email, password_hash, is_premium)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, full_name, email, password_hash, is_premium, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&input.full_name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.is_premium)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, full_name, email, password_hash, is_premium, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update_user_tier(&self, id: Uuid, is_premium: bool) -> Result<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET is_premium = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, full_name, email, password_hash, is_premium, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(is_premium)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
