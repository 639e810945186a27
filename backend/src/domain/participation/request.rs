//! Participation request entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, IllegalTransition, RequestId, StateMachine, Timestamp, UserId};

use super::RequestStatus;

/// A user's request to attend an event.
///
/// # Invariants
///
/// - at most one active (non-CANCELED) request per `(event_id, requester_id)`
/// - `requester_id` is never the event's initiator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationRequest {
    pub id: RequestId,
    pub event_id: EventId,
    pub requester_id: UserId,
    pub status: RequestStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ParticipationRequest {
    /// Creates a request with the status decided at admission.
    pub fn new(event_id: EventId, requester_id: UserId, status: RequestStatus, now: Timestamp) -> Self {
        Self {
            id: RequestId::new(),
            event_id,
            requester_id,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    pub fn confirm(&mut self, now: Timestamp) -> Result<(), IllegalTransition<RequestStatus>> {
        self.move_to(RequestStatus::Confirmed, now)
    }

    pub fn reject(&mut self, now: Timestamp) -> Result<(), IllegalTransition<RequestStatus>> {
        self.move_to(RequestStatus::Rejected, now)
    }

    /// Withdraws the request. Cancelling twice is a no-op.
    ///
    /// Returns whether the status changed.
    pub fn cancel(&mut self, now: Timestamp) -> bool {
        if self.status == RequestStatus::Canceled {
            return false;
        }
        self.status = RequestStatus::Canceled;
        self.updated_at = now;
        true
    }

    fn move_to(&mut self, target: RequestStatus, now: Timestamp) -> Result<(), IllegalTransition<RequestStatus>> {
        self.status = self.status.transition_to(target)?;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> ParticipationRequest {
        ParticipationRequest::new(
            EventId::new(),
            UserId::new("guest").unwrap(),
            RequestStatus::Pending,
            Timestamp::now(),
        )
    }

    #[test]
    fn confirm_updates_status_and_timestamp() {
        let mut request = pending();
        let later = request.created_at.plus_minutes(5);

        request.confirm(later).unwrap();

        assert_eq!(request.status, RequestStatus::Confirmed);
        assert_eq!(request.updated_at, later);
    }

    #[test]
    fn confirmed_request_cannot_be_rejected() {
        let mut request = pending();
        request.confirm(Timestamp::now()).unwrap();

        let err = request.reject(Timestamp::now()).unwrap_err();
        assert_eq!(err.from, RequestStatus::Confirmed);
        assert_eq!(request.status, RequestStatus::Confirmed);
    }

    #[test]
    fn cancel_is_allowed_from_any_status_and_idempotent() {
        let mut request = pending();
        request.reject(Timestamp::now()).unwrap();

        assert!(request.cancel(Timestamp::now()));
        assert!(!request.is_active());
        assert!(!request.cancel(Timestamp::now()));
        assert_eq!(request.status, RequestStatus::Canceled);
    }
}
