//! Wire types shared by the RPC routers and their HTTP clients.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::event::{EventSnapshot, ParticipantLimit};
use crate::domain::foundation::{EventId, Timestamp, UserId, ValidationError};

/// Event attributes served by `GET /internal/events/:event_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSnapshotResponse {
    pub id: Uuid,
    pub initiator_id: String,
    pub state: String,
    pub event_date: DateTime<Utc>,
    pub participant_limit: u32,
    pub moderation_enabled: bool,
}

impl From<&EventSnapshot> for EventSnapshotResponse {
    fn from(snapshot: &EventSnapshot) -> Self {
        Self {
            id: *snapshot.id.as_uuid(),
            initiator_id: snapshot.initiator_id.to_string(),
            state: snapshot.state.to_string(),
            event_date: *snapshot.event_date.as_datetime(),
            participant_limit: snapshot.participant_limit.value(),
            moderation_enabled: snapshot.moderation_enabled,
        }
    }
}

impl TryFrom<EventSnapshotResponse> for EventSnapshot {
    type Error = ValidationError;

    fn try_from(dto: EventSnapshotResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EventId::from_uuid(dto.id),
            initiator_id: UserId::new(dto.initiator_id)?,
            state: dto.state.parse()?,
            event_date: Timestamp::from_datetime(dto.event_date),
            participant_limit: ParticipantLimit::new(dto.participant_limit),
            moderation_enabled: dto.moderation_enabled,
        })
    }
}

/// Query of `GET /internal/requests/confirmed`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfirmedCountsQuery {
    /// Comma-separated event IDs.
    #[serde(default)]
    pub ids: String,
}

impl ConfirmedCountsQuery {
    pub fn event_ids(&self) -> Result<Vec<EventId>, ValidationError> {
        self.ids
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<EventId>()
                    .map_err(|_| ValidationError::invalid_format("ids", format!("'{}' is not a UUID", s)))
            })
            .collect()
    }

    pub fn from_ids(ids: &[EventId]) -> Self {
        Self {
            ids: ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(","),
        }
    }
}

/// Body of `GET /internal/requests/confirmed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedCountsResponse {
    pub counts: HashMap<Uuid, u64>,
}

impl From<HashMap<EventId, u64>> for ConfirmedCountsResponse {
    fn from(counts: HashMap<EventId, u64>) -> Self {
        Self {
            counts: counts.into_iter().map(|(id, n)| (*id.as_uuid(), n)).collect(),
        }
    }
}
