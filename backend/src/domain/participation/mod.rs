//! Participation module.
//!
//! Join requests, the admission decision and bulk moderation. Everything here
//! is pure; serialization per event is the ledger port's job.

mod admission;
mod errors;
mod moderation;
mod request;
mod status;

pub use admission::{decide_admission, AdmissionFacts};
pub use errors::ParticipationError;
pub use moderation::{
    apply_moderation, ensure_distinct, ensure_moderation_allowed, ModerationDecision,
    ModerationOutcome,
};
pub use request::ParticipationRequest;
pub use status::RequestStatus;
