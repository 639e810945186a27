//! UpdateEventHandler - Command handler for initiator edits.

use std::sync::Arc;

use crate::domain::event::{ActorRole, Event, EventChanges, EventError, ParticipantLimit, StateAction};
use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::ports::EventRepository;

/// Command to edit an event and optionally move it through review.
#[derive(Debug, Clone)]
pub struct UpdateEventCommand {
    pub initiator_id: UserId,
    pub event_id: EventId,
    pub title: Option<String>,
    pub event_date: Option<Timestamp>,
    /// Raw limit as submitted; negative values are rejected.
    pub participant_limit: Option<i64>,
    pub moderation_enabled: Option<bool>,
    /// `SEND_TO_REVIEW` or `CANCEL_REVIEW`.
    pub state_action: Option<StateAction>,
}

/// Handler for initiator edits.
///
/// Events are looked up by owner: a caller who did not create the event gets
/// the same NotFound as for a missing event.
pub struct UpdateEventHandler {
    repository: Arc<dyn EventRepository>,
}

impl UpdateEventHandler {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateEventCommand) -> Result<Event, EventError> {
        // 1. Only review actions are open to initiators
        if let Some(action) = cmd.state_action {
            if action.role() != ActorRole::Initiator {
                return Err(EventError::ActionNotAllowed(action));
            }
        }

        // 2. Load the caller's own event
        let mut event = self
            .repository
            .find_by_id(&cmd.event_id)
            .await?
            .filter(|e| e.is_initiated_by(&cmd.initiator_id))
            .ok_or(EventError::NotFound(cmd.event_id))?;

        // 3. Apply edits, then the review action
        let changes = EventChanges {
            title: cmd.title,
            event_date: cmd.event_date,
            participant_limit: cmd
                .participant_limit
                .map(ParticipantLimit::try_from_i64)
                .transpose()?,
            moderation_enabled: cmd.moderation_enabled,
        };
        let now = Timestamp::now();
        if !changes.is_empty() {
            event.apply_changes(changes, now)?;
        }
        if let Some(action) = cmd.state_action {
            event.apply_action(action, now)?;
        }

        // 4. Persist with the version check
        let event = self.repository.update(&event).await?;

        tracing::info!(
            event_id = %event.id,
            initiator_id = %cmd.initiator_id,
            state = %event.state,
            version = event.version,
            "event updated by initiator"
        );
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryEventRepository;
    use crate::domain::event::EventState;
    use crate::domain::foundation::ErrorKind;

    fn organizer() -> UserId {
        UserId::new("organizer").unwrap()
    }

    async fn setup(state: EventState) -> (UpdateEventHandler, Arc<InMemoryEventRepository>, Event) {
        let now = Timestamp::now();
        let event = Event {
            id: EventId::new(),
            initiator_id: organizer(),
            title: "Workshop".to_string(),
            event_date: now.plus_hours(48),
            participant_limit: ParticipantLimit::new(20),
            moderation_enabled: true,
            state,
            created_at: now,
            published_at: (state == EventState::Published).then_some(now),
            version: 0,
        };
        let repository = Arc::new(InMemoryEventRepository::new());
        repository.save(&event).await.unwrap();
        (UpdateEventHandler::new(repository.clone()), repository, event)
    }

    fn command(event: &Event) -> UpdateEventCommand {
        UpdateEventCommand {
            initiator_id: organizer(),
            event_id: event.id,
            title: None,
            event_date: None,
            participant_limit: None,
            moderation_enabled: None,
            state_action: None,
        }
    }

    #[tokio::test]
    async fn edits_pending_event() {
        let (handler, _, event) = setup(EventState::Pending).await;
        let cmd = UpdateEventCommand {
            title: Some("Advanced workshop".to_string()),
            participant_limit: Some(0),
            ..command(&event)
        };

        let updated = handler.handle(cmd).await.unwrap();

        assert_eq!(updated.title, "Advanced workshop");
        assert!(updated.participant_limit.is_unlimited());
        assert_eq!(updated.version, 1);
    }

    #[tokio::test]
    async fn cancel_review_then_send_to_review() {
        let (handler, _, event) = setup(EventState::Pending).await;

        let canceled = handler
            .handle(UpdateEventCommand {
                state_action: Some(StateAction::CancelReview),
                ..command(&event)
            })
            .await
            .unwrap();
        assert_eq!(canceled.state, EventState::Canceled);

        let pending = handler
            .handle(UpdateEventCommand {
                state_action: Some(StateAction::SendToReview),
                ..command(&event)
            })
            .await
            .unwrap();
        assert_eq!(pending.state, EventState::Pending);
        assert_eq!(pending.version, 2);
    }

    #[tokio::test]
    async fn published_event_is_immutable() {
        let (handler, repository, event) = setup(EventState::Published).await;

        let err = handler
            .handle(UpdateEventCommand {
                participant_limit: Some(1),
                ..command(&event)
            })
            .await
            .unwrap_err();
        assert_eq!(err, EventError::Immutable(event.id));

        let err = handler
            .handle(UpdateEventCommand {
                state_action: Some(StateAction::CancelReview),
                ..command(&event)
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let stored = repository.find_by_id(&event.id).await.unwrap().unwrap();
        assert_eq!(stored.participant_limit, ParticipantLimit::new(20));
        assert_eq!(stored.state, EventState::Published);
    }

    #[tokio::test]
    async fn other_users_see_not_found() {
        let (handler, _, event) = setup(EventState::Pending).await;

        let err = handler
            .handle(UpdateEventCommand {
                initiator_id: UserId::new("intruder").unwrap(),
                title: Some("Mine now".to_string()),
                ..command(&event)
            })
            .await
            .unwrap_err();
        assert_eq!(err, EventError::NotFound(event.id));
    }

    #[tokio::test]
    async fn admin_actions_are_bad_request() {
        let (handler, _, event) = setup(EventState::Pending).await;

        let err = handler
            .handle(UpdateEventCommand {
                state_action: Some(StateAction::PublishEvent),
                ..command(&event)
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn rescheduling_within_two_hours_is_conflict() {
        let (handler, _, event) = setup(EventState::Pending).await;

        let err = handler
            .handle(UpdateEventCommand {
                event_date: Some(Timestamp::now().plus_minutes(60)),
                ..command(&event)
            })
            .await
            .unwrap_err();
        assert_eq!(err, EventError::TooSoon { min_hours: 2 });
    }

    #[tokio::test]
    async fn negative_limit_is_bad_request() {
        let (handler, _, event) = setup(EventState::Pending).await;

        let err = handler
            .handle(UpdateEventCommand {
                participant_limit: Some(-5),
                ..command(&event)
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }
}
