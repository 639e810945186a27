//! Axum router for the event RPC endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{get_event, EventRpcState};

/// Create the event RPC router.
///
/// # Routes
/// - `GET /internal/events/:event_id` - Event snapshot, 404 when missing
pub fn event_rpc_router() -> Router<EventRpcState> {
    Router::new().route("/internal/events/:event_id", get(get_event))
}
