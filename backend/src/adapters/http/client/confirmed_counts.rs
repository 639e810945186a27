//! Confirmed count provider calling the request service over HTTP.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::adapters::http::dto::{ConfirmedCountsQuery, ConfirmedCountsResponse};
use crate::domain::foundation::{DomainError, EventId};
use crate::ports::ConfirmedCountProvider;

use super::{build_client, error_from_response, transport_error};

const SERVICE: &str = "request service";

/// [`ConfirmedCountProvider`] backed by `GET /internal/requests/confirmed`.
#[derive(Debug, Clone)]
pub struct HttpConfirmedCountProvider {
    base_url: String,
    client: Client,
}

impl HttpConfirmedCountProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl ConfirmedCountProvider for HttpConfirmedCountProvider {
    async fn batch_confirmed_counts(
        &self,
        event_ids: &[EventId],
    ) -> Result<HashMap<EventId, u64>, DomainError> {
        if event_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let response = self
            .client
            .get(format!("{}/internal/requests/confirmed", self.base_url))
            .query(&[("ids", ConfirmedCountsQuery::from_ids(event_ids).ids)])
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(error_from_response(SERVICE, response).await);
        }

        let body: ConfirmedCountsResponse = response
            .json()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        Ok(event_ids
            .iter()
            .map(|id| (*id, body.counts.get(id.as_uuid()).copied().unwrap_or(0)))
            .collect())
    }
}
