//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory storage for tests and single-process runs
//! - `postgres` - PostgreSQL storage
//! - `local` - In-process gateways for the monolith deployment
//! - `http` - Internal RPC routers and the clients that call them

pub mod http;
pub mod local;
pub mod memory;
pub mod postgres;

pub use local::LocalEventGateway;
pub use memory::{InMemoryEventRepository, InMemoryParticipationLedger, InMemoryUserDirectory};
pub use postgres::{PostgresEventRepository, PostgresParticipationLedger, PostgresUserDirectory};
