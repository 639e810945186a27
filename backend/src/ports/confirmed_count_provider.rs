//! Confirmed count port.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventId};

/// Port for reading how many CONFIRMED requests each event has.
///
/// Reflects committed state only.
#[async_trait]
pub trait ConfirmedCountProvider: Send + Sync {
    /// Maps every input ID to its confirmed count, defaulting to zero.
    async fn batch_confirmed_counts(
        &self,
        event_ids: &[EventId],
    ) -> Result<HashMap<EventId, u64>, DomainError>;
}
