//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `event` - Event publication lifecycle
//! - `participation` - Join requests, admission and moderation

pub mod event;
pub mod foundation;
pub mod participation;
