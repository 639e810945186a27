//! Event repository port (write side).
//!
//! Persists the Event aggregate for the service that owns events.
//!
//! # Design
//!
//! - **Optimistic locking**: `update` compares `version` and bumps it
//! - **Never deletes**: events end in CANCELED or PUBLISHED

use async_trait::async_trait;

use crate::domain::event::Event;
use crate::domain::foundation::{DomainError, EventId};

/// Repository port for Event aggregate persistence.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Save a new event.
    async fn save(&self, event: &Event) -> Result<(), DomainError>;

    /// Update an existing event and return it with its new version.
    ///
    /// # Errors
    ///
    /// - `EventNotFound` if the event doesn't exist
    /// - `ConcurrentModification` if the stored version differs from `event.version`
    /// - `DatabaseError` on persistence failure
    async fn update(&self, event: &Event) -> Result<Event, DomainError>;

    /// Find an event by its ID.
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError>;

    /// Find several events at once. Unknown IDs are skipped.
    async fn find_many(&self, ids: &[EventId]) -> Result<Vec<Event>, DomainError>;
}
