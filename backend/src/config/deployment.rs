//! Deployment topology configuration
//!
//! Decides which internal routers this process serves, where events and
//! confirmed counts come from, and which storage backs the ports.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which part of the platform this process runs.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServiceRole {
    /// Events and requests in one process, sharing storage.
    #[default]
    Monolith,
    /// Owns events; asks the request service for confirmed counts.
    EventService,
    /// Owns requests; asks the event service for event snapshots.
    RequestService,
}

impl ServiceRole {
    pub fn serves_events(&self) -> bool {
        matches!(self, ServiceRole::Monolith | ServiceRole::EventService)
    }

    pub fn serves_requests(&self) -> bool {
        matches!(self, ServiceRole::Monolith | ServiceRole::RequestService)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

/// Deployment configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentConfig {
    #[serde(default)]
    pub role: ServiceRole,

    #[serde(default)]
    pub storage: StorageBackend,

    /// Base URL of the event service; required for `request_service`
    pub event_service_url: Option<String>,

    /// Base URL of the request service; required for `event_service`
    pub request_service_url: Option<String>,

    /// Timeout for outgoing RPC calls, in seconds
    #[serde(default = "default_rpc_timeout")]
    pub rpc_timeout_secs: u64,
}

impl DeploymentConfig {
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    /// Validate deployment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.rpc_timeout_secs == 0 || self.rpc_timeout_secs > 60 {
            return Err(ValidationError::InvalidRpcTimeout);
        }
        match self.role {
            ServiceRole::Monolith => Ok(()),
            ServiceRole::EventService => require_url(
                self.request_service_url.as_deref(),
                "deployment.request_service_url",
            ),
            ServiceRole::RequestService => require_url(
                self.event_service_url.as_deref(),
                "deployment.event_service_url",
            ),
        }
    }
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            role: ServiceRole::default(),
            storage: StorageBackend::default(),
            event_service_url: None,
            request_service_url: None,
            rpc_timeout_secs: default_rpc_timeout(),
        }
    }
}

fn require_url(url: Option<&str>, name: &'static str) -> Result<(), ValidationError> {
    match url {
        None | Some("") => Err(ValidationError::MissingRequired(name)),
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => Ok(()),
        Some(_) => Err(ValidationError::InvalidServiceUrl(name)),
    }
}

fn default_rpc_timeout() -> u64 {
    3
}
