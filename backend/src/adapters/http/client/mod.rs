//! HTTP clients for collaborator services.
//!
//! Transport failures, timeouts and 5xx answers all surface as
//! `ServiceUnavailable`; nothing falls back to a default value.

mod confirmed_counts;
mod event_gateway;

pub use confirmed_counts::HttpConfirmedCountProvider;
pub use event_gateway::HttpEventGateway;

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Builds the shared reqwest client with the RPC timeout.
fn build_client(timeout: Duration) -> Result<Client, DomainError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Failed to create HTTP client: {}", e)))
}

fn transport_error(service: &str, err: reqwest::Error) -> DomainError {
    tracing::warn!(service, error = %err, "collaborator call failed");
    DomainError::unavailable(format!("{} unreachable: {}", service, err))
}

/// Converts a non-success response into a domain error.
async fn error_from_response(service: &str, response: Response) -> DomainError {
    let status = response.status();
    let body = response.json::<ErrorResponse>().await.ok();

    if status.is_server_error() || status == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!(service, %status, "collaborator answered with an error");
        return DomainError::unavailable(format!("{} answered {}", service, status));
    }

    let message = body
        .map(|b| format!("{} answered {}: {} {}", service, status, b.error_code, b.message))
        .unwrap_or_else(|| format!("{} answered {}", service, status));
    DomainError::new(ErrorCode::InternalError, message)
}
