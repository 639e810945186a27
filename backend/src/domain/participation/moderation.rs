//! Bulk moderation of pending requests.
//!
//! A batch is all-or-nothing: [`apply_moderation`] either returns every
//! request updated or an error and no updated request at all. The caller
//! persists the outcome inside the event's serialized scope.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::event::EventSnapshot;
use crate::domain::foundation::{RequestId, Timestamp, UserId};

use super::{ParticipationError, ParticipationRequest, RequestStatus};

/// Organizer decision applied to every request of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModerationDecision {
    #[serde(rename = "CONFIRMED")]
    Confirm,
    #[serde(rename = "REJECTED")]
    Reject,
}

impl ModerationDecision {
    pub fn target_status(&self) -> RequestStatus {
        match self {
            ModerationDecision::Confirm => RequestStatus::Confirmed,
            ModerationDecision::Reject => RequestStatus::Rejected,
        }
    }
}

impl TryFrom<RequestStatus> for ModerationDecision {
    type Error = ParticipationError;

    fn try_from(status: RequestStatus) -> Result<Self, Self::Error> {
        match status {
            RequestStatus::Confirmed => Ok(ModerationDecision::Confirm),
            RequestStatus::Rejected => Ok(ModerationDecision::Reject),
            other => Err(ParticipationError::InvalidDecision(other.to_string())),
        }
    }
}

impl FromStr for ModerationDecision {
    type Err = ParticipationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = s
            .parse::<RequestStatus>()
            .map_err(|_| ParticipationError::InvalidDecision(s.to_string()))?;
        ModerationDecision::try_from(status)
    }
}

impl fmt::Display for ModerationDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.target_status().as_str())
    }
}

/// Requests updated by a batch, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationOutcome {
    pub confirmed: Vec<ParticipationRequest>,
    pub rejected: Vec<ParticipationRequest>,
}

impl ModerationOutcome {
    pub fn is_empty(&self) -> bool {
        self.confirmed.is_empty() && self.rejected.is_empty()
    }

    /// Every updated request, confirmed first.
    pub fn updated(&self) -> impl Iterator<Item = &ParticipationRequest> {
        self.confirmed.iter().chain(self.rejected.iter())
    }
}

/// Checks that `organizer` may moderate requests of `event` at all.
pub fn ensure_moderation_allowed(
    event: &EventSnapshot,
    organizer: &UserId,
) -> Result<(), ParticipationError> {
    if !event.is_initiated_by(organizer) {
        return Err(ParticipationError::NotInitiator(event.id));
    }
    if !event.requires_moderation() {
        return Err(ParticipationError::ModerationNotApplicable(event.id));
    }
    if !event.is_published() {
        return Err(ParticipationError::EventNotPublished(event.id));
    }
    Ok(())
}

/// Rejects batches that name the same request twice.
pub fn ensure_distinct(ids: &[RequestId]) -> Result<(), ParticipationError> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id) {
            return Err(ParticipationError::invalid_batch(format!(
                "request {} appears more than once",
                id
            )));
        }
    }
    Ok(())
}

/// Applies `decision` to `requests` in order.
///
/// `confirmed_count` is the event's CONFIRMED count read under the event's
/// lock. Confirmations draw from the remaining capacity one by one; the batch
/// aborts as soon as one would overflow it.
pub fn apply_moderation(
    event: &EventSnapshot,
    requests: Vec<ParticipationRequest>,
    decision: ModerationDecision,
    confirmed_count: u64,
    now: Timestamp,
) -> Result<ModerationOutcome, ParticipationError> {
    for request in &requests {
        if request.event_id != event.id {
            return Err(ParticipationError::RequestEventMismatch {
                request_id: request.id,
                event_id: event.id,
            });
        }
        if !request.is_pending() {
            return Err(ParticipationError::RequestNotPending {
                request_id: request.id,
                status: request.status,
            });
        }
    }

    let mut outcome = ModerationOutcome::default();
    let mut confirmed_so_far = confirmed_count;

    for mut request in requests {
        match decision {
            ModerationDecision::Confirm => {
                if event.participant_limit.is_reached(confirmed_so_far) {
                    return Err(ParticipationError::ParticipantLimitReached {
                        event_id: event.id,
                        limit: event.participant_limit.value(),
                    });
                }
                transition(&mut request, RequestStatus::Confirmed, now)?;
                confirmed_so_far += 1;
                outcome.confirmed.push(request);
            }
            ModerationDecision::Reject => {
                transition(&mut request, RequestStatus::Rejected, now)?;
                outcome.rejected.push(request);
            }
        }
    }

    Ok(outcome)
}

fn transition(
    request: &mut ParticipationRequest,
    target: RequestStatus,
    now: Timestamp,
) -> Result<(), ParticipationError> {
    let result = match target {
        RequestStatus::Confirmed => request.confirm(now),
        _ => request.reject(now),
    };
    result.map_err(|illegal| ParticipationError::InvalidTransition {
        request_id: request.id,
        from: illegal.from,
        to: illegal.to,
    })
}
