//! ChangeEventStateHandler - Admin command handler for publishing and rejecting events.

use std::sync::Arc;

use crate::domain::event::{ActorRole, Event, EventError, StateAction};
use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::ports::EventRepository;

/// Command issued by an admin to publish or reject an event.
#[derive(Debug, Clone)]
pub struct ChangeEventStateCommand {
    pub admin_id: UserId,
    pub event_id: EventId,
    pub action: StateAction,
}

/// Handler for admin lifecycle actions.
pub struct ChangeEventStateHandler {
    repository: Arc<dyn EventRepository>,
}

impl ChangeEventStateHandler {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: ChangeEventStateCommand) -> Result<Event, EventError> {
        // 1. Only PUBLISH_EVENT and REJECT_EVENT are admin actions
        if cmd.action.role() != ActorRole::Admin {
            return Err(EventError::ActionNotAllowed(cmd.action));
        }

        // 2. Load the event
        let mut event = self
            .repository
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or(EventError::NotFound(cmd.event_id))?;

        // 3. Apply the transition
        let from = event.state;
        if let Err(err) = event.apply_action(cmd.action, Timestamp::now()) {
            tracing::warn!(
                event_id = %cmd.event_id,
                admin_id = %cmd.admin_id,
                action = %cmd.action,
                state = %from,
                error = %err,
                "lifecycle action refused"
            );
            return Err(err);
        }

        // 4. Persist with the version check
        let event = self.repository.update(&event).await?;

        tracing::info!(
            event_id = %event.id,
            admin_id = %cmd.admin_id,
            action = %cmd.action,
            from = %from,
            to = %event.state,
            "event state changed"
        );
        Ok(event)
    }
}
