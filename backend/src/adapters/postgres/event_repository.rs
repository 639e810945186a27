//! PostgreSQL implementation of EventRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::event::Event;
use crate::domain::foundation::{DomainError, ErrorCode, EventId};
use crate::ports::EventRepository;

use super::rows::{db_error, limit_to_i32, EventRow, EVENT_COLUMNS};

/// PostgreSQL implementation of the EventRepository port.
#[derive(Clone)]
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn save(&self, event: &Event) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO events (
                id, initiator_id, title, event_date, participant_limit,
                moderation_enabled, state, created_at, published_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(event.initiator_id.as_str())
        .bind(&event.title)
        .bind(event.event_date.as_datetime())
        .bind(limit_to_i32(event.participant_limit)?)
        .bind(event.moderation_enabled)
        .bind(event.state.as_str())
        .bind(event.created_at.as_datetime())
        .bind(event.published_at.map(|t| *t.as_datetime()))
        .bind(event.version as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save event", e))?;

        Ok(())
    }

    async fn update(&self, event: &Event) -> Result<Event, DomainError> {
        let new_version: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE events SET
                title = $3,
                event_date = $4,
                participant_limit = $5,
                moderation_enabled = $6,
                state = $7,
                published_at = $8,
                version = version + 1
            WHERE id = $1 AND version = $2
            RETURNING version
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(event.version as i32)
        .bind(&event.title)
        .bind(event.event_date.as_datetime())
        .bind(limit_to_i32(event.participant_limit)?)
        .bind(event.moderation_enabled)
        .bind(event.state.as_str())
        .bind(event.published_at.map(|t| *t.as_datetime()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update event", e))?;

        if let Some(version) = new_version {
            let mut updated = event.clone();
            updated.version = version as u32;
            return Ok(updated);
        }

        // Nothing matched: tell a missing row apart from a stale version.
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)")
            .bind(event.id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check event", e))?;

        let (code, message) = if exists {
            (ErrorCode::ConcurrentModification, format!("Event {} was modified concurrently", event.id))
        } else {
            (ErrorCode::EventNotFound, format!("Event {} not found", event.id))
        };
        Err(DomainError::new(code, message).with_detail("event_id", event.id.to_string()))
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        let row: Option<EventRow> =
            sqlx::query_as(&format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to fetch event", e))?;

        row.map(Event::try_from).transpose()
    }

    async fn find_many(&self, ids: &[EventId]) -> Result<Vec<Event>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<EventRow> =
            sqlx::query_as(&format!("SELECT {} FROM events WHERE id = ANY($1)", EVENT_COLUMNS))
                .bind(&uuids)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("Failed to fetch events", e))?;

        let mut events = rows
            .into_iter()
            .map(Event::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        events.sort_by_key(|e| ids.iter().position(|id| *id == e.id));
        Ok(events)
    }
}
