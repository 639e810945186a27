//! Participation ledger port.
//!
//! Storage of participation requests with a per-event serialization point.
//! Every write that depends on the event's confirmed count or on existing
//! requests happens inside an [`EventScope`].
//!
//! # Example
//!
//! ```ignore
//! let mut scope = ledger.open_scope(&event_id).await?;
//! let confirmed = scope.confirmed_count().await?;
//! // decide using `confirmed` ...
//! scope.insert(&request).await?;
//! scope.commit().await?;
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventId, RequestId, UserId};
use crate::domain::participation::ParticipationRequest;

/// Repository port for participation requests.
#[async_trait]
pub trait ParticipationLedger: Send + Sync {
    /// Opens the serialized unit of work for one event.
    ///
    /// Waits while another scope for the same event is open. Scopes for
    /// different events never block each other.
    async fn open_scope(&self, event_id: &EventId) -> Result<Box<dyn EventScope>, DomainError>;

    /// Find a request by ID, outside of any scope.
    async fn find_by_id(&self, id: &RequestId) -> Result<Option<ParticipationRequest>, DomainError>;

    /// All requests of an event, oldest first.
    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<ParticipationRequest>, DomainError>;

    /// All requests made by a user, oldest first.
    async fn list_for_requester(
        &self,
        requester_id: &UserId,
    ) -> Result<Vec<ParticipationRequest>, DomainError>;
}

/// Serialized unit of work over one event's requests.
///
/// Reads see committed state plus this scope's own staged writes. Dropping
/// the scope without calling [`EventScope::commit`] discards every write.
#[async_trait]
pub trait EventScope: Send {
    fn event_id(&self) -> EventId;

    /// Number of CONFIRMED requests of the scoped event.
    async fn confirmed_count(&mut self) -> Result<u64, DomainError>;

    /// Whether `requester_id` holds a non-CANCELED request for the scoped event.
    async fn has_active_request(&mut self, requester_id: &UserId) -> Result<bool, DomainError>;

    /// Loads the requests with the given IDs. Unknown IDs are skipped; order is unspecified.
    async fn find_requests(&mut self, ids: &[RequestId]) -> Result<Vec<ParticipationRequest>, DomainError>;

    /// Stages a new request.
    ///
    /// # Errors
    ///
    /// - `DuplicateRequest` if the requester already has an active request
    async fn insert(&mut self, request: &ParticipationRequest) -> Result<(), DomainError>;

    /// Stages a status change of an existing request.
    async fn update(&mut self, request: &ParticipationRequest) -> Result<(), DomainError>;

    /// Makes every staged write visible atomically and releases the event.
    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participation_ledger_is_object_safe() {
        fn _accepts_dyn(_ledger: &dyn ParticipationLedger) {}
    }

    #[test]
    fn event_scope_is_object_safe() {
        fn _accepts_dyn(_scope: Box<dyn EventScope>) {}
    }
}
