//! RequestToJoinHandler - Command handler for join requests.
//!
//! The duplicate check, the capacity check and the insert all run inside one
//! event scope, so concurrent joins for the same event are decided one at a
//! time against committed state.

use std::sync::Arc;

use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::domain::participation::{
    decide_admission, AdmissionFacts, ParticipationError, ParticipationRequest,
};
use crate::ports::{EventGateway, ParticipationLedger};

/// Command to request participation in an event.
#[derive(Debug, Clone)]
pub struct RequestToJoinCommand {
    pub requester_id: UserId,
    pub event_id: EventId,
}

/// Handler for join requests.
pub struct RequestToJoinHandler {
    events: Arc<dyn EventGateway>,
    ledger: Arc<dyn ParticipationLedger>,
}

impl RequestToJoinHandler {
    pub fn new(events: Arc<dyn EventGateway>, ledger: Arc<dyn ParticipationLedger>) -> Self {
        Self { events, ledger }
    }

    pub async fn handle(
        &self,
        cmd: RequestToJoinCommand,
    ) -> Result<ParticipationRequest, ParticipationError> {
        // 1. Event attributes, possibly from the event service
        let event = self
            .events
            .get_event(&cmd.event_id)
            .await?
            .ok_or(ParticipationError::EventNotFound(cmd.event_id))?;

        // 2. Serialize against other writers of this event
        let mut scope = self.ledger.open_scope(&event.id).await?;
        let facts = AdmissionFacts {
            active_request_exists: scope.has_active_request(&cmd.requester_id).await?,
            confirmed_count: scope.confirmed_count().await?,
        };

        // 3. Decide
        let status = match decide_admission(&event, &cmd.requester_id, facts) {
            Ok(status) => status,
            Err(err) => {
                tracing::warn!(
                    event_id = %event.id,
                    requester_id = %cmd.requester_id,
                    confirmed_count = facts.confirmed_count,
                    error_code = %err.code(),
                    "join request refused"
                );
                return Err(err);
            }
        };

        // 4. Persist and release the scope
        let request = ParticipationRequest::new(event.id, cmd.requester_id, status, Timestamp::now());
        scope.insert(&request).await?;
        scope.commit().await?;

        tracing::info!(
            request_id = %request.id,
            event_id = %request.event_id,
            requester_id = %request.requester_id,
            status = %request.status,
            "join request created"
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryParticipationLedger;
    use crate::domain::event::{EventSnapshot, EventState, ParticipantLimit};
    use crate::domain::foundation::{DomainError, ErrorCode, ErrorKind};
    use crate::domain::participation::RequestStatus;
    use crate::domain::foundation::RequestId;
    use crate::ports::{ConfirmedCountProvider, EventScope};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    // ════════════════════════════════════════════════════════════════════════
    // Mock implementations
    // ════════════════════════════════════════════════════════════════════════

    #[derive(Default)]
    struct StaticEventGateway {
        events: HashMap<EventId, EventSnapshot>,
    }

    impl StaticEventGateway {
        fn with(event: EventSnapshot) -> Self {
            Self {
                events: HashMap::from([(event.id, event)]),
            }
        }
    }

    #[async_trait]
    impl EventGateway for StaticEventGateway {
        async fn get_event(&self, id: &EventId) -> Result<Option<EventSnapshot>, DomainError> {
            Ok(self.events.get(id).cloned())
        }
    }

    struct DownEventGateway;

    #[async_trait]
    impl EventGateway for DownEventGateway {
        async fn get_event(&self, _id: &EventId) -> Result<Option<EventSnapshot>, DomainError> {
            Err(DomainError::new(ErrorCode::ServiceUnavailable, "connection refused"))
        }
    }

    /// In-memory ledger whose scopes sleep after reading the confirmed count.
    struct SlowCountLedger(Arc<InMemoryParticipationLedger>);

    #[async_trait]
    impl ParticipationLedger for SlowCountLedger {
        async fn open_scope(&self, event_id: &EventId) -> Result<Box<dyn EventScope>, DomainError> {
            Ok(Box::new(SlowCountScope(self.0.open_scope(event_id).await?)))
        }

        async fn find_by_id(&self, id: &RequestId) -> Result<Option<ParticipationRequest>, DomainError> {
            self.0.find_by_id(id).await
        }

        async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<ParticipationRequest>, DomainError> {
            self.0.list_for_event(event_id).await
        }

        async fn list_for_requester(
            &self,
            requester_id: &UserId,
        ) -> Result<Vec<ParticipationRequest>, DomainError> {
            self.0.list_for_requester(requester_id).await
        }
    }

    struct SlowCountScope(Box<dyn EventScope>);

    #[async_trait]
    impl EventScope for SlowCountScope {
        fn event_id(&self) -> EventId {
            self.0.event_id()
        }

        async fn confirmed_count(&mut self) -> Result<u64, DomainError> {
            let count = self.0.confirmed_count().await?;
            tokio::time::sleep(Duration::from_millis(2)).await;
            Ok(count)
        }

        async fn has_active_request(&mut self, requester_id: &UserId) -> Result<bool, DomainError> {
            self.0.has_active_request(requester_id).await
        }

        async fn find_requests(&mut self, ids: &[RequestId]) -> Result<Vec<ParticipationRequest>, DomainError> {
            self.0.find_requests(ids).await
        }

        async fn insert(&mut self, request: &ParticipationRequest) -> Result<(), DomainError> {
            self.0.insert(request).await
        }

        async fn update(&mut self, request: &ParticipationRequest) -> Result<(), DomainError> {
            self.0.update(request).await
        }

        async fn commit(self: Box<Self>) -> Result<(), DomainError> {
            self.0.commit().await
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════════

    fn organizer() -> UserId {
        UserId::new("organizer").unwrap()
    }

    fn guest(n: usize) -> UserId {
        UserId::new(format!("guest-{}", n)).unwrap()
    }

    fn event(state: EventState, limit: u32, moderation_enabled: bool) -> EventSnapshot {
        EventSnapshot {
            id: EventId::new(),
            initiator_id: organizer(),
            state,
            event_date: Timestamp::now().plus_hours(24),
            participant_limit: ParticipantLimit::new(limit),
            moderation_enabled,
        }
    }

    fn handler(event: EventSnapshot) -> (RequestToJoinHandler, Arc<InMemoryParticipationLedger>) {
        let ledger = Arc::new(InMemoryParticipationLedger::new());
        let handler = RequestToJoinHandler::new(
            Arc::new(StaticEventGateway::with(event)),
            ledger.clone(),
        );
        (handler, ledger)
    }

    fn join(requester: UserId, event: &EventSnapshot) -> RequestToJoinCommand {
        RequestToJoinCommand {
            requester_id: requester,
            event_id: event.id,
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Initial status
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn moderated_limited_event_queues_request() {
        let event = event(EventState::Published, 5, true);
        let (handler, ledger) = handler(event.clone());

        let request = handler.handle(join(guest(1), &event)).await.unwrap();

        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(ledger.find_by_id(&request.id).await.unwrap(), Some(request));
    }

    #[tokio::test]
    async fn unmoderated_event_confirms_immediately() {
        let event = event(EventState::Published, 5, false);
        let (handler, _) = handler(event.clone());

        let request = handler.handle(join(guest(1), &event)).await.unwrap();
        assert_eq!(request.status, RequestStatus::Confirmed);
    }

    #[tokio::test]
    async fn unlimited_event_confirms_even_with_moderation() {
        let event = event(EventState::Published, 0, true);
        let (handler, _) = handler(event.clone());

        let request = handler.handle(join(guest(1), &event)).await.unwrap();
        assert_eq!(request.status, RequestStatus::Confirmed);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Refusals
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn missing_event_is_not_found() {
        let (handler, _) = handler(event(EventState::Published, 5, false));
        let missing = EventId::new();

        let err = handler
            .handle(RequestToJoinCommand {
                requester_id: guest(1),
                event_id: missing,
            })
            .await
            .unwrap_err();
        assert_eq!(err, ParticipationError::EventNotFound(missing));
    }

    #[tokio::test]
    async fn unpublished_event_is_conflict() {
        for state in [EventState::Pending, EventState::Canceled] {
            let event = event(state, 5, false);
            let (handler, ledger) = handler(event.clone());

            let err = handler.handle(join(guest(1), &event)).await.unwrap_err();
            assert_eq!(err, ParticipationError::EventNotPublished(event.id));
            assert!(ledger.list_for_event(&event.id).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn initiator_cannot_join() {
        let event = event(EventState::Published, 5, false);
        let (handler, _) = handler(event.clone());

        let err = handler.handle(join(organizer(), &event)).await.unwrap_err();
        assert_eq!(err, ParticipationError::SelfParticipation(event.id));
    }

    #[tokio::test]
    async fn second_active_request_is_conflict() {
        let event = event(EventState::Published, 5, true);
        let (handler, _) = handler(event.clone());

        handler.handle(join(guest(1), &event)).await.unwrap();
        let err = handler.handle(join(guest(1), &event)).await.unwrap_err();

        assert!(matches!(err, ParticipationError::DuplicateRequest { .. }));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn full_event_is_conflict() {
        let event = event(EventState::Published, 2, false);
        let (handler, ledger) = handler(event.clone());

        handler.handle(join(guest(1), &event)).await.unwrap();
        handler.handle(join(guest(2), &event)).await.unwrap();
        let err = handler.handle(join(guest(3), &event)).await.unwrap_err();

        assert_eq!(
            err,
            ParticipationError::ParticipantLimitReached {
                event_id: event.id,
                limit: 2
            }
        );
        let counts = ledger.batch_confirmed_counts(&[event.id]).await.unwrap();
        assert_eq!(counts[&event.id], 2);
    }

    #[tokio::test]
    async fn pending_requests_do_not_occupy_slots() {
        let event = event(EventState::Published, 1, true);
        let (handler, _) = handler(event.clone());

        for n in 0..3 {
            let request = handler.handle(join(guest(n), &event)).await.unwrap();
            assert_eq!(request.status, RequestStatus::Pending);
        }
    }

    #[tokio::test]
    async fn unreachable_event_service_is_unavailable() {
        let handler = RequestToJoinHandler::new(
            Arc::new(DownEventGateway),
            Arc::new(InMemoryParticipationLedger::new()),
        );

        let err = handler
            .handle(RequestToJoinCommand {
                requester_id: guest(1),
                event_id: EventId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_joins_respect_limit() {
        let event = event(EventState::Published, 3, false);
        let ledger = Arc::new(InMemoryParticipationLedger::new());
        let handler = Arc::new(RequestToJoinHandler::new(
            Arc::new(StaticEventGateway::with(event.clone())),
            Arc::new(SlowCountLedger(ledger.clone())),
        ));

        let tasks: Vec<_> = (0..20)
            .map(|n| {
                let handler = handler.clone();
                let cmd = join(guest(n), &event);
                tokio::spawn(async move { handler.handle(cmd).await })
            })
            .collect();

        let mut admitted = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 3);
        let counts = ledger.batch_confirmed_counts(&[event.id]).await.unwrap();
        assert_eq!(counts[&event.id], 3);
    }
}
