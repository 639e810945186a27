//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait and the error
//! vocabulary shared by the event lifecycle and participation modules.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ErrorKind, ValidationError};
pub use ids::{EventId, RequestId, UserId};
pub use state_machine::{IllegalTransition, StateMachine};
pub use timestamp::Timestamp;
