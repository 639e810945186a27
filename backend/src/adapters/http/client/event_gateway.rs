//! Event gateway calling the event service over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::adapters::http::dto::EventSnapshotResponse;
use crate::domain::event::EventSnapshot;
use crate::domain::foundation::{DomainError, ErrorCode, EventId};
use crate::ports::EventGateway;

use super::{build_client, error_from_response, transport_error};

const SERVICE: &str = "event service";

/// [`EventGateway`] backed by `GET /internal/events/:event_id`.
#[derive(Debug, Clone)]
pub struct HttpEventGateway {
    base_url: String,
    client: Client,
}

impl HttpEventGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }

    fn event_url(&self, id: &EventId) -> String {
        format!("{}/internal/events/{}", self.base_url, id)
    }
}

#[async_trait]
impl EventGateway for HttpEventGateway {
    async fn get_event(&self, id: &EventId) -> Result<Option<EventSnapshot>, DomainError> {
        let response = self
            .client
            .get(self.event_url(id))
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_from_response(SERVICE, response).await);
        }

        let dto: EventSnapshotResponse = response
            .json()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        let snapshot = EventSnapshot::try_from(dto).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Malformed event snapshot: {}", e))
        })?;

        tracing::debug!(event_id = %id, state = %snapshot.state, "fetched event snapshot");
        Ok(Some(snapshot))
    }
}
