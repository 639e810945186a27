//! Event gateway port.
//!
//! Read access to event attributes for the participation side, whether the
//! events live in the same process or in a separate service.

use async_trait::async_trait;

use crate::domain::event::EventSnapshot;
use crate::domain::foundation::{DomainError, EventId};

/// Port for fetching the admission-relevant view of an event.
#[async_trait]
pub trait EventGateway: Send + Sync {
    /// Returns `None` when the event does not exist.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` when the owning service cannot be reached
    async fn get_event(&self, id: &EventId) -> Result<Option<EventSnapshot>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn EventGateway) {}
    }
}
