//! Event Admission - participation engine for an event-hosting platform
//!
//! Drives the event publication lifecycle and decides join requests against a
//! hard per-event attendance cap, including bulk moderation by organizers.
//!
//! # Surface
//!
//! The operations (create, publish, join, moderate, cancel, list) are the
//! command and query handlers in [`application`], built from
//! [`state::AppState`]. They are reachable through this library only.
//!
//! The `event-admission` binary serves only the internal RPC that split
//! deployments need between themselves:
//!
//! - `GET /internal/events/:event_id` (event service, monolith)
//! - `GET /internal/requests/confirmed?ids=...` (request service, monolith)
//!
//! No user-facing HTTP routes are exposed by the binary.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod state;
