//! HTTP handlers for the event RPC endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, State};

use crate::domain::foundation::{DomainError, ErrorCode, EventId, ValidationError};
use crate::ports::EventGateway;

use crate::adapters::http::dto::EventSnapshotResponse;
use crate::adapters::http::error::ApiError;

/// Shared state of the event RPC router.
#[derive(Clone)]
pub struct EventRpcState {
    pub event_gateway: Arc<dyn EventGateway>,
}

/// GET /internal/events/:event_id - Admission view of one event
pub async fn get_event(
    State(state): State<EventRpcState>,
    Path(event_id): Path<String>,
) -> Result<Json<EventSnapshotResponse>, ApiError> {
    let id: EventId = event_id
        .parse()
        .map_err(|_| ValidationError::invalid_format("event_id", format!("'{}' is not a UUID", event_id)))?;

    let snapshot = state.event_gateway.get_event(&id).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::EventNotFound, format!("Event {} not found", id))
            .with_detail("event_id", id.to_string())
    })?;

    Ok(Json(EventSnapshotResponse::from(&snapshot)))
}
