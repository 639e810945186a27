//! In-memory user directory.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::UserDirectory;

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashSet<UserId>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users.into_iter().collect())),
        }
    }

    pub async fn register(&self, user_id: UserId) {
        self.users.write().await.insert(user_id);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn exists(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.users.read().await.contains(user_id))
    }
}
