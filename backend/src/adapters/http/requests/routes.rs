//! Axum router for the request RPC endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{get_confirmed_counts, RequestRpcState};

/// Create the request RPC router.
///
/// # Routes
/// - `GET /internal/requests/confirmed?ids=<uuid,...>` - Confirmed counts, zero for unknown events
pub fn request_rpc_router() -> Router<RequestRpcState> {
    Router::new().route("/internal/requests/confirmed", get(get_confirmed_counts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::http::dto::{ConfirmedCountsQuery, ConfirmedCountsResponse};
    use crate::adapters::memory::InMemoryParticipationLedger;
    use crate::domain::foundation::{EventId, Timestamp, UserId};
    use crate::domain::participation::{ParticipationRequest, RequestStatus};
    use crate::ports::ParticipationLedger;

    async fn ledger_with_confirmed(event_id: EventId, n: usize) -> InMemoryParticipationLedger {
        let ledger = InMemoryParticipationLedger::new();
        let mut scope = ledger.open_scope(&event_id).await.unwrap();
        for i in 0..n {
            let request = ParticipationRequest::new(
                event_id,
                UserId::new(format!("guest-{}", i)).unwrap(),
                RequestStatus::Confirmed,
                Timestamp::now(),
            );
            scope.insert(&request).await.unwrap();
        }
        scope.commit().await.unwrap();
        ledger
    }

    #[tokio::test]
    async fn returns_counts_for_every_requested_event() {
        let busy = EventId::new();
        let quiet = EventId::new();
        let ledger = ledger_with_confirmed(busy, 3).await;
        let app = request_rpc_router().with_state(RequestRpcState {
            confirmed_counts: Arc::new(ledger),
        });

        let query = ConfirmedCountsQuery::from_ids(&[busy, quiet]);
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/internal/requests/confirmed?ids={}", query.ids))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ConfirmedCountsResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.counts[busy.as_uuid()], 3);
        assert_eq!(body.counts[quiet.as_uuid()], 0);
    }

    #[tokio::test]
    async fn malformed_ids_are_400() {
        let app = request_rpc_router().with_state(RequestRpcState {
            confirmed_counts: Arc::new(InMemoryParticipationLedger::new()),
        });

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/internal/requests/confirmed?ids=abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
