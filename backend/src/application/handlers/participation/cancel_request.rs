//! CancelRequestHandler - Command handler for withdrawing a join request.
//!
//! Cancelling is always allowed for the owner. A CONFIRMED request gives its
//! slot back to future admissions; decisions already taken stay as they are.

use std::sync::Arc;

use crate::domain::foundation::{RequestId, Timestamp, UserId};
use crate::domain::participation::{ParticipationError, ParticipationRequest};
use crate::ports::ParticipationLedger;

/// Command to cancel one's own request.
#[derive(Debug, Clone)]
pub struct CancelRequestCommand {
    pub requester_id: UserId,
    pub request_id: RequestId,
}

/// Handler for request cancellation.
///
/// Requests of other users are reported as missing.
pub struct CancelRequestHandler {
    ledger: Arc<dyn ParticipationLedger>,
}

impl CancelRequestHandler {
    pub fn new(ledger: Arc<dyn ParticipationLedger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(
        &self,
        cmd: CancelRequestCommand,
    ) -> Result<ParticipationRequest, ParticipationError> {
        let not_found = || ParticipationError::RequestNotFound(cmd.request_id);

        let located = self
            .ledger
            .find_by_id(&cmd.request_id)
            .await?
            .filter(|r| r.requester_id == cmd.requester_id)
            .ok_or_else(not_found)?;

        // Re-read under the event's lock; a moderation batch may have run since.
        let mut scope = self.ledger.open_scope(&located.event_id).await?;
        let mut request = scope
            .find_requests(&[cmd.request_id])
            .await?
            .pop()
            .ok_or_else(not_found)?;

        let previous = request.status;
        if request.cancel(Timestamp::now()) {
            scope.update(&request).await?;
            scope.commit().await?;
            tracing::info!(
                request_id = %request.id,
                event_id = %request.event_id,
                requester_id = %request.requester_id,
                previous_status = %previous,
                "join request canceled"
            );
        }

        Ok(request)
    }
}
