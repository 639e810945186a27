//! Event lifecycle module.
//!
//! Publication state machine, the event aggregate and the snapshot the
//! participation engine reads.

mod action;
mod aggregate;
mod capacity;
mod errors;
mod snapshot;
mod state;

pub use action::{ActorRole, StateAction};
pub use aggregate::{
    Event, EventChanges, EventDraft, MIN_HOURS_BEFORE_PUBLICATION, MIN_HOURS_BEFORE_SCHEDULING,
};
pub use capacity::ParticipantLimit;
pub use errors::EventError;
pub use snapshot::EventSnapshot;
pub use state::EventState;
