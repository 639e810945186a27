//! ModerateRequestsHandler - Command handler for bulk moderation.
//!
//! The whole batch runs in one event scope: either every request moves to the
//! target status or the scope is dropped and nothing changes.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::foundation::{EventId, RequestId, Timestamp, UserId};
use crate::domain::participation::{
    apply_moderation, ensure_distinct, ensure_moderation_allowed, ModerationDecision,
    ModerationOutcome, ParticipationError, ParticipationRequest, RequestStatus,
};
use crate::ports::{EventGateway, ParticipationLedger};

/// Command to confirm or reject a batch of pending requests.
#[derive(Debug, Clone)]
pub struct ModerateRequestsCommand {
    pub organizer_id: UserId,
    pub event_id: EventId,
    /// Processed in this order.
    pub request_ids: Vec<RequestId>,
    /// CONFIRMED or REJECTED; anything else is refused.
    pub target_status: RequestStatus,
}

/// Handler for bulk moderation.
pub struct ModerateRequestsHandler {
    events: Arc<dyn EventGateway>,
    ledger: Arc<dyn ParticipationLedger>,
}

impl ModerateRequestsHandler {
    pub fn new(events: Arc<dyn EventGateway>, ledger: Arc<dyn ParticipationLedger>) -> Self {
        Self { events, ledger }
    }

    pub async fn handle(
        &self,
        cmd: ModerateRequestsCommand,
    ) -> Result<ModerationOutcome, ParticipationError> {
        let decision = ModerationDecision::try_from(cmd.target_status)?;

        // 1. Event-level preconditions
        let event = self
            .events
            .get_event(&cmd.event_id)
            .await?
            .ok_or(ParticipationError::EventNotFound(cmd.event_id))?;
        ensure_moderation_allowed(&event, &cmd.organizer_id)?;
        ensure_distinct(&cmd.request_ids)?;

        if cmd.request_ids.is_empty() {
            return Ok(ModerationOutcome::default());
        }

        // 2. Load the batch under the event's lock
        let mut scope = self.ledger.open_scope(&event.id).await?;
        let requests = in_batch_order(scope.find_requests(&cmd.request_ids).await?, &cmd.request_ids)?;
        let confirmed_count = scope.confirmed_count().await?;

        // 3. Decide the whole batch before writing anything
        let outcome = match apply_moderation(&event, requests, decision, confirmed_count, Timestamp::now()) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(
                    event_id = %event.id,
                    organizer_id = %cmd.organizer_id,
                    decision = %decision,
                    batch_size = cmd.request_ids.len(),
                    confirmed_count,
                    error_code = %err.code(),
                    "moderation batch aborted"
                );
                return Err(err);
            }
        };

        // 4. Persist
        for request in outcome.updated() {
            scope.update(request).await?;
        }
        scope.commit().await?;

        tracing::info!(
            event_id = %event.id,
            organizer_id = %cmd.organizer_id,
            confirmed = outcome.confirmed.len(),
            rejected = outcome.rejected.len(),
            "moderation batch applied"
        );
        Ok(outcome)
    }
}

/// Orders `found` like `ids`. The first id without a request fails the batch.
fn in_batch_order(
    found: Vec<ParticipationRequest>,
    ids: &[RequestId],
) -> Result<Vec<ParticipationRequest>, ParticipationError> {
    let mut by_id: HashMap<RequestId, ParticipationRequest> =
        found.into_iter().map(|r| (r.id, r)).collect();
    ids.iter()
        .map(|id| by_id.remove(id).ok_or(ParticipationError::RequestNotFound(*id)))
        .collect()
}
