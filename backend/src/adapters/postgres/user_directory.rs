//! PostgreSQL implementation of UserDirectory.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::UserDirectory;

use super::rows::db_error;

#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn exists(&self, user_id: &UserId) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to look up user", e))
    }
}
