//! In-memory adapters.
//!
//! Back the `memory` storage mode and the handler and integration tests.

mod event_repository;
mod participation_ledger;
mod user_directory;

pub use event_repository::InMemoryEventRepository;
pub use participation_ledger::{InMemoryEventScope, InMemoryParticipationLedger};
pub use user_directory::InMemoryUserDirectory;
