//! PostgreSQL adapters.
//!
//! Back the `postgres` storage mode. Schema lives in `migrations/`.

mod event_repository;
mod participation_ledger;
mod pool;
mod rows;
mod user_directory;

pub use event_repository::PostgresEventRepository;
pub use participation_ledger::{PostgresEventScope, PostgresParticipationLedger};
pub use pool::{connect, run_migrations};
pub use user_directory::PostgresUserDirectory;
