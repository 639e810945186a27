//! ListEventRequestsHandler - Query handler for an event's join requests.

use std::sync::Arc;

use crate::domain::foundation::{EventId, UserId};
use crate::domain::participation::{ParticipationError, ParticipationRequest};
use crate::ports::{EventGateway, ParticipationLedger};

/// Query for all requests of one event, as seen by its organizer.
#[derive(Debug, Clone)]
pub struct ListEventRequestsQuery {
    pub organizer_id: UserId,
    pub event_id: EventId,
}

/// Handler listing an event's requests for its initiator.
pub struct ListEventRequestsHandler {
    events: Arc<dyn EventGateway>,
    ledger: Arc<dyn ParticipationLedger>,
}

impl ListEventRequestsHandler {
    pub fn new(events: Arc<dyn EventGateway>, ledger: Arc<dyn ParticipationLedger>) -> Self {
        Self { events, ledger }
    }

    pub async fn handle(
        &self,
        query: ListEventRequestsQuery,
    ) -> Result<Vec<ParticipationRequest>, ParticipationError> {
        let event = self
            .events
            .get_event(&query.event_id)
            .await?
            .ok_or(ParticipationError::EventNotFound(query.event_id))?;

        if !event.is_initiated_by(&query.organizer_id) {
            return Err(ParticipationError::NotInitiator(event.id));
        }

        Ok(self.ledger.list_for_event(&event.id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryParticipationLedger;
    use crate::domain::event::{EventSnapshot, EventState, ParticipantLimit};
    use crate::domain::foundation::{DomainError, Timestamp};
    use crate::domain::participation::RequestStatus;
    use async_trait::async_trait;

    struct StaticEventGateway(EventSnapshot);

    #[async_trait]
    impl EventGateway for StaticEventGateway {
        async fn get_event(&self, id: &EventId) -> Result<Option<EventSnapshot>, DomainError> {
            Ok((self.0.id == *id).then(|| self.0.clone()))
        }
    }

    fn organizer() -> UserId {
        UserId::new("organizer").unwrap()
    }

    async fn fixture() -> (ListEventRequestsHandler, EventSnapshot) {
        let event = EventSnapshot {
            id: EventId::new(),
            initiator_id: organizer(),
            state: EventState::Published,
            event_date: Timestamp::now().plus_hours(24),
            participant_limit: ParticipantLimit::new(10),
            moderation_enabled: true,
        };
        let ledger = Arc::new(InMemoryParticipationLedger::new());
        let mut scope = ledger.open_scope(&event.id).await.unwrap();
        for name in ["ann", "bo"] {
            let request = ParticipationRequest::new(
                event.id,
                UserId::new(name).unwrap(),
                RequestStatus::Pending,
                Timestamp::now(),
            );
            scope.insert(&request).await.unwrap();
        }
        scope.commit().await.unwrap();

        let handler =
            ListEventRequestsHandler::new(Arc::new(StaticEventGateway(event.clone())), ledger);
        (handler, event)
    }

    #[tokio::test]
    async fn initiator_sees_all_requests() {
        let (handler, event) = fixture().await;

        let requests = handler
            .handle(ListEventRequestsQuery {
                organizer_id: organizer(),
                event_id: event.id,
            })
            .await
            .unwrap();

        let requesters: Vec<_> = requests.iter().map(|r| r.requester_id.as_str()).collect();
        assert_eq!(requesters, vec!["ann", "bo"]);
    }

    #[tokio::test]
    async fn other_users_are_refused() {
        let (handler, event) = fixture().await;

        let err = handler
            .handle(ListEventRequestsQuery {
                organizer_id: UserId::new("ann").unwrap(),
                event_id: event.id,
            })
            .await
            .unwrap_err();
        assert_eq!(err, ParticipationError::NotInitiator(event.id));
    }

    #[tokio::test]
    async fn missing_event_is_not_found() {
        let (handler, _) = fixture().await;
        let missing = EventId::new();

        let err = handler
            .handle(ListEventRequestsQuery {
                organizer_id: organizer(),
                event_id: missing,
            })
            .await
            .unwrap_err();
        assert_eq!(err, ParticipationError::EventNotFound(missing));
    }
}
