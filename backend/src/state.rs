//! Process wiring.
//!
//! Builds the port implementations for the configured storage and role, hands
//! out the application handlers, and assembles the internal RPC router.

use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::http::{
    event_rpc_router, request_rpc_router, EventRpcState, HttpConfirmedCountProvider,
    HttpEventGateway, RequestRpcState,
};
use crate::adapters::memory::{
    InMemoryEventRepository, InMemoryParticipationLedger, InMemoryUserDirectory,
};
use crate::adapters::postgres::{
    self, PostgresEventRepository, PostgresParticipationLedger, PostgresUserDirectory,
};
use crate::adapters::LocalEventGateway;
use crate::application::{
    CancelRequestHandler, ChangeEventStateHandler, CreateEventHandler, GetEventAttendanceHandler,
    ListEventRequestsHandler, ListUserRequestsHandler, ModerateRequestsHandler,
    RequestToJoinHandler, UpdateEventHandler,
};
use crate::config::{AppConfig, DeploymentConfig, ServiceRole, StorageBackend, ValidationError};
use crate::domain::foundation::DomainError;
use crate::ports::{
    ConfirmedCountProvider, EventGateway, EventRepository, ParticipationLedger, UserDirectory,
};

/// Failures while assembling the process.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("collaborator client setup failed: {0}")]
    Client(#[from] DomainError),
}

/// Storage-backed ports of one process.
struct Storage {
    events: Arc<dyn EventRepository>,
    ledger: Arc<dyn ParticipationLedger>,
    confirmed_counts: Arc<dyn ConfirmedCountProvider>,
    users: Arc<dyn UserDirectory>,
}

impl Storage {
    fn in_memory() -> Self {
        let ledger = Arc::new(InMemoryParticipationLedger::new());
        Self {
            events: Arc::new(InMemoryEventRepository::new()),
            ledger: ledger.clone(),
            confirmed_counts: ledger,
            users: Arc::new(InMemoryUserDirectory::new()),
        }
    }

    async fn postgres(config: &AppConfig) -> Result<Self, StartupError> {
        let database = config
            .postgres()
            .ok_or(ValidationError::MissingRequired("database.url"))?;
        let pool = postgres::connect(database).await?;
        if database.run_migrations {
            postgres::run_migrations(&pool).await?;
        }

        let ledger = Arc::new(PostgresParticipationLedger::new(pool.clone()));
        Ok(Self {
            events: Arc::new(PostgresEventRepository::new(pool.clone())),
            ledger: ledger.clone(),
            confirmed_counts: ledger,
            users: Arc::new(PostgresUserDirectory::new(pool)),
        })
    }
}

/// Everything a running process needs, shared behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub role: ServiceRole,
    pub events: Arc<dyn EventRepository>,
    /// Local repository or the event service, depending on role.
    pub event_gateway: Arc<dyn EventGateway>,
    pub ledger: Arc<dyn ParticipationLedger>,
    /// Local ledger or the request service, depending on role.
    pub confirmed_counts: Arc<dyn ConfirmedCountProvider>,
    pub users: Arc<dyn UserDirectory>,
}

impl AppState {
    /// Connects storage and collaborator clients for `config`.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        config.validate()?;
        let storage = match config.deployment.storage {
            StorageBackend::Memory => Storage::in_memory(),
            StorageBackend::Postgres => Storage::postgres(config).await?,
        };
        Self::assemble(&config.deployment, storage)
    }

    /// Single-process state on in-memory storage.
    pub fn in_memory() -> Self {
        let storage = Storage::in_memory();
        Self {
            role: ServiceRole::Monolith,
            event_gateway: Arc::new(LocalEventGateway::new(storage.events.clone())),
            events: storage.events,
            ledger: storage.ledger,
            confirmed_counts: storage.confirmed_counts,
            users: storage.users,
        }
    }

    fn assemble(deployment: &DeploymentConfig, storage: Storage) -> Result<Self, StartupError> {
        let event_gateway: Arc<dyn EventGateway> = match (deployment.role, &deployment.event_service_url) {
            (ServiceRole::RequestService, Some(url)) => {
                Arc::new(HttpEventGateway::new(url.clone(), deployment.rpc_timeout())?)
            }
            _ => Arc::new(LocalEventGateway::new(storage.events.clone())),
        };
        let confirmed_counts: Arc<dyn ConfirmedCountProvider> =
            match (deployment.role, &deployment.request_service_url) {
                (ServiceRole::EventService, Some(url)) => Arc::new(HttpConfirmedCountProvider::new(
                    url.clone(),
                    deployment.rpc_timeout(),
                )?),
                _ => storage.confirmed_counts,
            };

        tracing::info!(
            role = ?deployment.role,
            storage = ?deployment.storage,
            "application state assembled"
        );
        Ok(Self {
            role: deployment.role,
            events: storage.events,
            event_gateway,
            ledger: storage.ledger,
            confirmed_counts,
            users: storage.users,
        })
    }

    // ════════════════════════════════════════════════════════════════════════
    // Handlers
    // ════════════════════════════════════════════════════════════════════════

    pub fn create_event(&self) -> CreateEventHandler {
        CreateEventHandler::new(self.events.clone(), self.users.clone())
    }

    pub fn change_event_state(&self) -> ChangeEventStateHandler {
        ChangeEventStateHandler::new(self.events.clone())
    }

    pub fn update_event(&self) -> UpdateEventHandler {
        UpdateEventHandler::new(self.events.clone())
    }

    pub fn event_attendance(&self) -> GetEventAttendanceHandler {
        GetEventAttendanceHandler::new(self.events.clone(), self.confirmed_counts.clone())
    }

    pub fn request_to_join(&self) -> RequestToJoinHandler {
        RequestToJoinHandler::new(self.event_gateway.clone(), self.ledger.clone())
    }

    pub fn moderate_requests(&self) -> ModerateRequestsHandler {
        ModerateRequestsHandler::new(self.event_gateway.clone(), self.ledger.clone())
    }

    pub fn cancel_request(&self) -> CancelRequestHandler {
        CancelRequestHandler::new(self.ledger.clone())
    }

    pub fn list_event_requests(&self) -> ListEventRequestsHandler {
        ListEventRequestsHandler::new(self.event_gateway.clone(), self.ledger.clone())
    }

    pub fn list_user_requests(&self) -> ListUserRequestsHandler {
        ListUserRequestsHandler::new(self.users.clone(), self.ledger.clone())
    }

    // ════════════════════════════════════════════════════════════════════════
    // Router
    // ════════════════════════════════════════════════════════════════════════

    /// Internal RPC routes served by this role.
    ///
    /// Only the event snapshot and confirmed-count endpoints. The admission
    /// handlers are reached through the factory methods above, not over HTTP.
    pub fn router(&self, request_timeout: std::time::Duration) -> Router {
        let mut router = Router::new();
        if self.role.serves_events() {
            router = router.merge(event_rpc_router().with_state(EventRpcState {
                event_gateway: self.event_gateway.clone(),
            }));
        }
        if self.role.serves_requests() {
            router = router.merge(request_rpc_router().with_state(RequestRpcState {
                confirmed_counts: self.confirmed_counts.clone(),
            }));
        }
        router
            .layer(TimeoutLayer::new(request_timeout))
            .layer(TraceLayer::new_for_http())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::domain::event::{Event, EventDraft, ParticipantLimit};
    use crate::domain::foundation::{ErrorCode, EventId, Timestamp, UserId};

    async fn status_of(router: Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn monolith_serves_both_routers() {
        let state = AppState::in_memory();
        let router = state.router(Duration::from_secs(5));

        let event_status = status_of(router.clone(), &format!("/internal/events/{}", EventId::new())).await;
        let counts_status = status_of(
            router,
            &format!("/internal/requests/confirmed?ids={}", EventId::new()),
        )
        .await;

        assert_eq!(event_status, StatusCode::NOT_FOUND);
        assert_eq!(counts_status, StatusCode::OK);
    }

    #[tokio::test]
    async fn binary_router_has_no_user_facing_routes() {
        let router = AppState::in_memory().router(Duration::from_secs(5));
        let event_id = EventId::new();

        let join = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/events/{}/requests", event_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(join.status(), StatusCode::NOT_FOUND);
        assert_eq!(status_of(router, "/events").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn request_service_does_not_serve_events() {
        let deployment = DeploymentConfig {
            role: ServiceRole::RequestService,
            event_service_url: Some("http://127.0.0.1:9".to_string()),
            ..Default::default()
        };
        let state = AppState::assemble(&deployment, Storage::in_memory()).unwrap();
        let router = state.router(Duration::from_secs(5));

        let event_status = status_of(router.clone(), &format!("/internal/events/{}", EventId::new())).await;
        let counts_status = status_of(
            router,
            &format!("/internal/requests/confirmed?ids={}", EventId::new()),
        )
        .await;

        assert_eq!(event_status, StatusCode::NOT_FOUND);
        assert_eq!(counts_status, StatusCode::OK);
    }

    #[tokio::test]
    async fn request_service_reads_events_remotely() {
        let deployment = DeploymentConfig {
            role: ServiceRole::RequestService,
            event_service_url: Some("http://127.0.0.1:9".to_string()),
            rpc_timeout_secs: 1,
            ..Default::default()
        };
        let state = AppState::assemble(&deployment, Storage::in_memory()).unwrap();

        let err = state.event_gateway.get_event(&EventId::new()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn handlers_share_storage() {
        let state = AppState::in_memory();
        let now = Timestamp::now();
        let event = Event::create(
            EventId::new(),
            UserId::new("organizer").unwrap(),
            EventDraft {
                title: "Board games".to_string(),
                event_date: now.plus_hours(10),
                participant_limit: ParticipantLimit::new(4),
                moderation_enabled: false,
            },
            now,
        )
        .unwrap();
        state.events.save(&event).await.unwrap();

        let snapshot = state.event_gateway.get_event(&event.id).await.unwrap();
        assert_eq!(snapshot, Some(event.snapshot()));
    }

    #[tokio::test]
    async fn postgres_storage_without_database_is_rejected() {
        let config = AppConfig {
            server: Default::default(),
            deployment: DeploymentConfig {
                storage: StorageBackend::Postgres,
                ..Default::default()
            },
            database: None,
        };

        let result = AppState::from_config(&config).await;
        assert!(matches!(result, Err(StartupError::Config(_))));
    }
}
