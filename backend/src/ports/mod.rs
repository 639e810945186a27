//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventRepository` - Event aggregate persistence (event-owning side)
//! - `EventGateway` - Admission view of an event, local or remote
//!
//! ## Participation Ports
//!
//! - `ParticipationLedger` / `EventScope` - Request storage with per-event serialization
//! - `ConfirmedCountProvider` - Batched confirmed counts for read-side enrichment
//!
//! ## Directory Ports
//!
//! - `UserDirectory` - Existence checks for users

mod confirmed_count_provider;
mod event_gateway;
mod event_repository;
mod participation_ledger;
mod user_directory;

pub use confirmed_count_provider::ConfirmedCountProvider;
pub use event_gateway::EventGateway;
pub use event_repository::EventRepository;
pub use participation_ledger::{EventScope, ParticipationLedger};
pub use user_directory::UserDirectory;
