//! User directory port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};

/// Lookup of registered users. Registration itself lives elsewhere.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn exists(&self, user_id: &UserId) -> Result<bool, DomainError>;
}
