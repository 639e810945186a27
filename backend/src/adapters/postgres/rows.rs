//! Row types and column codecs shared by the PostgreSQL adapters.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::event::{Event, EventState, ParticipantLimit};
use crate::domain::foundation::{DomainError, ErrorCode, EventId, RequestId, Timestamp, UserId};
use crate::domain::participation::{ParticipationRequest, RequestStatus};

/// Database row representation of an event.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct EventRow {
    pub id: Uuid,
    pub initiator_id: String,
    pub title: String,
    pub event_date: DateTime<Utc>,
    pub participant_limit: i32,
    pub moderation_enabled: bool,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub version: i32,
}

impl TryFrom<EventRow> for Event {
    type Error = DomainError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let participant_limit = u32::try_from(row.participant_limit)
            .map(ParticipantLimit::new)
            .map_err(|_| corrupt(format!("negative participant_limit {}", row.participant_limit)))?;
        let version = u32::try_from(row.version).map_err(|_| corrupt(format!("negative version {}", row.version)))?;

        Ok(Event {
            id: EventId::from_uuid(row.id),
            initiator_id: parse_user_id(row.initiator_id)?,
            title: row.title,
            event_date: Timestamp::from_datetime(row.event_date),
            participant_limit,
            moderation_enabled: row.moderation_enabled,
            state: parse_state(&row.state)?,
            created_at: Timestamp::from_datetime(row.created_at),
            published_at: row.published_at.map(Timestamp::from_datetime),
            version,
        })
    }
}

/// Database row representation of a participation request.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct RequestRow {
    pub id: Uuid,
    pub event_id: Uuid,
    pub requester_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<RequestRow> for ParticipationRequest {
    type Error = DomainError;

    fn try_from(row: RequestRow) -> Result<Self, Self::Error> {
        Ok(ParticipationRequest {
            id: RequestId::from_uuid(row.id),
            event_id: EventId::from_uuid(row.event_id),
            requester_id: parse_user_id(row.requester_id)?,
            status: parse_status(&row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

pub(super) const REQUEST_COLUMNS: &str = "id, event_id, requester_id, status, created_at, updated_at";

pub(super) const EVENT_COLUMNS: &str = "id, initiator_id, title, event_date, participant_limit, \
     moderation_enabled, state, created_at, published_at, version";

fn parse_state(s: &str) -> Result<EventState, DomainError> {
    s.parse().map_err(|_| corrupt(format!("Invalid state value: {}", s)))
}

fn parse_status(s: &str) -> Result<RequestStatus, DomainError> {
    s.parse().map_err(|_| corrupt(format!("Invalid status value: {}", s)))
}

fn parse_user_id(s: String) -> Result<UserId, DomainError> {
    UserId::new(s).map_err(|e| corrupt(format!("Invalid user id: {}", e)))
}

fn corrupt(message: String) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, message)
}

pub(super) fn limit_to_i32(limit: ParticipantLimit) -> Result<i32, DomainError> {
    i32::try_from(limit.value()).map_err(|_| {
        DomainError::validation("participant_limit", format!("{} exceeds the storable maximum", limit))
    })
}

pub(super) fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    tracing::error!(error = %err, "{}", context);
    DomainError::database(format!("{}: {}", context, err))
}
