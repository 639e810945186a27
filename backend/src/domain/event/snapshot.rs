//! Read-only view of an event consumed by the admission engine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, Timestamp, UserId};

use super::{EventState, ParticipantLimit};

/// The event attributes admission and moderation depend on.
///
/// Once `state` is PUBLISHED none of these fields can change, so a snapshot
/// fetched from another service stays valid for the rest of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub id: EventId,
    pub initiator_id: UserId,
    pub state: EventState,
    pub event_date: Timestamp,
    pub participant_limit: ParticipantLimit,
    pub moderation_enabled: bool,
}

impl EventSnapshot {
    pub fn is_published(&self) -> bool {
        self.state == EventState::Published
    }

    pub fn is_initiated_by(&self, user: &UserId) -> bool {
        &self.initiator_id == user
    }

    /// Whether new requests wait for the organizer instead of being confirmed.
    ///
    /// An unlimited event never queues, whatever the moderation flag says.
    pub fn requires_moderation(&self) -> bool {
        self.moderation_enabled && !self.participant_limit.is_unlimited()
    }
}
