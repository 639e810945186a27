//! CreateEventHandler - Command handler for creating events.

use std::sync::Arc;

use crate::domain::event::{Event, EventDraft, EventError, ParticipantLimit};
use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::ports::{EventRepository, UserDirectory};

/// Command to create an event.
#[derive(Debug, Clone)]
pub struct CreateEventCommand {
    pub initiator_id: UserId,
    pub title: String,
    pub event_date: Timestamp,
    /// Raw limit as submitted; negative values are rejected.
    pub participant_limit: i64,
    pub moderation_enabled: bool,
}

/// Handler for creating events.
///
/// New events start PENDING and wait for an admin to publish them.
pub struct CreateEventHandler {
    repository: Arc<dyn EventRepository>,
    users: Arc<dyn UserDirectory>,
}

impl CreateEventHandler {
    pub fn new(repository: Arc<dyn EventRepository>, users: Arc<dyn UserDirectory>) -> Self {
        Self { repository, users }
    }

    pub async fn handle(&self, cmd: CreateEventCommand) -> Result<Event, EventError> {
        // 1. Initiator must be a known user
        if !self.users.exists(&cmd.initiator_id).await? {
            return Err(EventError::UserNotFound(cmd.initiator_id));
        }

        // 2. Validate input and build the aggregate
        let participant_limit = ParticipantLimit::try_from_i64(cmd.participant_limit)?;
        let draft = EventDraft {
            title: cmd.title,
            event_date: cmd.event_date,
            participant_limit,
            moderation_enabled: cmd.moderation_enabled,
        };
        let event = Event::create(EventId::new(), cmd.initiator_id, draft, Timestamp::now())?;

        // 3. Persist
        self.repository.save(&event).await?;

        tracing::info!(
            event_id = %event.id,
            initiator_id = %event.initiator_id,
            participant_limit = %event.participant_limit,
            moderation_enabled = event.moderation_enabled,
            "event created"
        );
        Ok(event)
    }
}
