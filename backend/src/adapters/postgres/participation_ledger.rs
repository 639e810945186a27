//! PostgreSQL implementation of ParticipationLedger.
//!
//! A scope is one transaction. Its first statement takes a transaction-level
//! advisory lock keyed by the event ID, so writers of the same event queue up
//! behind each other and the lock is released by COMMIT or ROLLBACK. The
//! partial unique index `participation_requests_one_active` backs the
//! one-active-request rule at the storage level.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, EventId, RequestId, UserId};
use crate::domain::participation::{ParticipationRequest, RequestStatus};
use crate::ports::{ConfirmedCountProvider, EventScope, ParticipationLedger};

use super::rows::{db_error, RequestRow, REQUEST_COLUMNS};

const ONE_ACTIVE_CONSTRAINT: &str = "participation_requests_one_active";

/// PostgreSQL implementation of the ParticipationLedger port.
#[derive(Clone)]
pub struct PostgresParticipationLedger {
    pool: PgPool,
}

impl PostgresParticipationLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipationLedger for PostgresParticipationLedger {
    async fn open_scope(&self, event_id: &EventId) -> Result<Box<dyn EventScope>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(event_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to lock event", e))?;

        Ok(Box::new(PostgresEventScope {
            event_id: *event_id,
            tx,
        }))
    }

    async fn find_by_id(&self, id: &RequestId) -> Result<Option<ParticipationRequest>, DomainError> {
        let row: Option<RequestRow> = sqlx::query_as(&format!(
            "SELECT {} FROM participation_requests WHERE id = $1",
            REQUEST_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch participation request", e))?;

        row.map(ParticipationRequest::try_from).transpose()
    }

    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<ParticipationRequest>, DomainError> {
        let rows: Vec<RequestRow> = sqlx::query_as(&format!(
            "SELECT {} FROM participation_requests WHERE event_id = $1 ORDER BY created_at, id",
            REQUEST_COLUMNS
        ))
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list participation requests", e))?;

        rows.into_iter().map(ParticipationRequest::try_from).collect()
    }

    async fn list_for_requester(
        &self,
        requester_id: &UserId,
    ) -> Result<Vec<ParticipationRequest>, DomainError> {
        let rows: Vec<RequestRow> = sqlx::query_as(&format!(
            "SELECT {} FROM participation_requests WHERE requester_id = $1 ORDER BY created_at, id",
            REQUEST_COLUMNS
        ))
        .bind(requester_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list participation requests", e))?;

        rows.into_iter().map(ParticipationRequest::try_from).collect()
    }
}

#[async_trait]
impl ConfirmedCountProvider for PostgresParticipationLedger {
    async fn batch_confirmed_counts(
        &self,
        event_ids: &[EventId],
    ) -> Result<HashMap<EventId, u64>, DomainError> {
        let mut counts: HashMap<EventId, u64> = event_ids.iter().map(|id| (*id, 0)).collect();
        if event_ids.is_empty() {
            return Ok(counts);
        }
        let uuids: Vec<Uuid> = event_ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<(Uuid, i64)> = sqlx::query_as(
            r#"
            SELECT event_id, COUNT(*)
            FROM participation_requests
            WHERE event_id = ANY($1) AND status = 'CONFIRMED'
            GROUP BY event_id
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count confirmed requests", e))?;

        for (event_id, count) in rows {
            counts.insert(EventId::from_uuid(event_id), count.max(0) as u64);
        }
        Ok(counts)
    }
}

/// One event's serialized unit of work: an open transaction holding the event's advisory lock.
pub struct PostgresEventScope {
    event_id: EventId,
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl EventScope for PostgresEventScope {
    fn event_id(&self) -> EventId {
        self.event_id
    }

    async fn confirmed_count(&mut self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM participation_requests WHERE event_id = $1 AND status = 'CONFIRMED'",
        )
        .bind(self.event_id.as_uuid())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| db_error("Failed to count confirmed requests", e))?;

        Ok(count.max(0) as u64)
    }

    async fn has_active_request(&mut self, requester_id: &UserId) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM participation_requests
                WHERE event_id = $1 AND requester_id = $2 AND status <> 'CANCELED'
            )
            "#,
        )
        .bind(self.event_id.as_uuid())
        .bind(requester_id.as_str())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| db_error("Failed to check active requests", e))
    }

    async fn find_requests(&mut self, ids: &[RequestId]) -> Result<Vec<ParticipationRequest>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<RequestRow> = sqlx::query_as(&format!(
            "SELECT {} FROM participation_requests WHERE id = ANY($1)",
            REQUEST_COLUMNS
        ))
        .bind(&uuids)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| db_error("Failed to fetch participation requests", e))?;

        rows.into_iter().map(ParticipationRequest::try_from).collect()
    }

    async fn insert(&mut self, request: &ParticipationRequest) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO participation_requests (
                id, event_id, requester_id, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.event_id.as_uuid())
        .bind(request.requester_id.as_str())
        .bind(request.status.as_str())
        .bind(request.created_at.as_datetime())
        .bind(request.updated_at.as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(ONE_ACTIVE_CONSTRAINT) {
                    return DomainError::new(
                        ErrorCode::DuplicateRequest,
                        "Requester already has an active request for this event",
                    )
                    .with_detail("event_id", request.event_id.to_string())
                    .with_detail("requester_id", request.requester_id.as_str());
                }
            }
            db_error("Failed to save participation request", e)
        })?;

        Ok(())
    }

    async fn update(&mut self, request: &ParticipationRequest) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE participation_requests SET status = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(request.id.as_uuid())
        .bind(request.status.as_str())
        .bind(request.updated_at.as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| db_error("Failed to update participation request", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::RequestNotFound,
                format!("Request {} not found", request.id),
            ));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .commit()
            .await
            .map_err(|e| db_error("Failed to commit participation changes", e))
    }
}
