//! In-memory event repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::event::Event;
use crate::domain::foundation::{DomainError, ErrorCode, EventId};
use crate::ports::EventRepository;

/// In-memory implementation of [`EventRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<HashMap<EventId, Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn save(&self, event: &Event) -> Result<(), DomainError> {
        let mut events = self.events.write().await;
        if events.contains_key(&event.id) {
            return Err(DomainError::database(format!("Event {} already exists", event.id)));
        }
        events.insert(event.id, event.clone());
        Ok(())
    }

    async fn update(&self, event: &Event) -> Result<Event, DomainError> {
        let mut events = self.events.write().await;
        let stored = events.get_mut(&event.id).ok_or_else(|| {
            DomainError::new(ErrorCode::EventNotFound, format!("Event {} not found", event.id))
                .with_detail("event_id", event.id.to_string())
        })?;

        if stored.version != event.version {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "Event {} is at version {}, update was based on {}",
                    event.id, stored.version, event.version
                ),
            )
            .with_detail("event_id", event.id.to_string()));
        }

        let mut updated = event.clone();
        updated.version += 1;
        *stored = updated.clone();
        Ok(updated)
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        Ok(self.events.read().await.get(id).cloned())
    }

    async fn find_many(&self, ids: &[EventId]) -> Result<Vec<Event>, DomainError> {
        let events = self.events.read().await;
        Ok(ids.iter().filter_map(|id| events.get(id)).cloned().collect())
    }
}
