//! Event gateway backed directly by the event repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::event::EventSnapshot;
use crate::domain::foundation::{DomainError, EventId};
use crate::ports::{EventGateway, EventRepository};

/// Serves snapshots from the local [`EventRepository`].
#[derive(Clone)]
pub struct LocalEventGateway {
    repository: Arc<dyn EventRepository>,
}

impl LocalEventGateway {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl EventGateway for LocalEventGateway {
    async fn get_event(&self, id: &EventId) -> Result<Option<EventSnapshot>, DomainError> {
        Ok(self.repository.find_by_id(id).await?.map(|event| event.snapshot()))
    }
}
