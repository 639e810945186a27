//! HTTP handlers for the request RPC endpoints.

use std::sync::Arc;

use axum::extract::{Json, Query, State};

use crate::ports::ConfirmedCountProvider;

use crate::adapters::http::dto::{ConfirmedCountsQuery, ConfirmedCountsResponse};
use crate::adapters::http::error::ApiError;

/// Shared state of the request RPC router.
#[derive(Clone)]
pub struct RequestRpcState {
    pub confirmed_counts: Arc<dyn ConfirmedCountProvider>,
}

/// GET /internal/requests/confirmed?ids=... - Confirmed count per event
pub async fn get_confirmed_counts(
    State(state): State<RequestRpcState>,
    Query(query): Query<ConfirmedCountsQuery>,
) -> Result<Json<ConfirmedCountsResponse>, ApiError> {
    let event_ids = query.event_ids()?;
    let counts = state.confirmed_counts.batch_confirmed_counts(&event_ids).await?;
    Ok(Json(ConfirmedCountsResponse::from(counts)))
}
