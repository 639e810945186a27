//! Admission decision for a single join request.
//!
//! Pure function over the event snapshot and the facts read inside the
//! event's serialized scope. Callers must obtain `active_request_exists` and
//! `confirmed_count` under the same scope they later commit the new request in.

use crate::domain::event::EventSnapshot;
use crate::domain::foundation::UserId;

use super::{ParticipationError, RequestStatus};

/// Facts about the event's existing requests, read under the event's lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmissionFacts {
    pub active_request_exists: bool,
    pub confirmed_count: u64,
}

/// Decides the initial status of a new request, or why it cannot be created.
///
/// Checks run in a fixed order: self-participation, publication, duplicate,
/// capacity. The first failing check wins.
pub fn decide_admission(
    event: &EventSnapshot,
    requester: &UserId,
    facts: AdmissionFacts,
) -> Result<RequestStatus, ParticipationError> {
    if event.is_initiated_by(requester) {
        return Err(ParticipationError::SelfParticipation(event.id));
    }

    if !event.is_published() {
        return Err(ParticipationError::EventNotPublished(event.id));
    }

    if facts.active_request_exists {
        return Err(ParticipationError::DuplicateRequest {
            event_id: event.id,
            requester_id: requester.clone(),
        });
    }

    if event.participant_limit.is_reached(facts.confirmed_count) {
        return Err(ParticipationError::ParticipantLimitReached {
            event_id: event.id,
            limit: event.participant_limit.value(),
        });
    }

    if event.requires_moderation() {
        Ok(RequestStatus::Pending)
    } else {
        Ok(RequestStatus::Confirmed)
    }
}
