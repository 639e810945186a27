//! HTTP adapters.
//!
//! Internal RPC routers exposed by each service role, the HTTP clients that
//! call them, and the shared wire types.

pub mod client;
pub mod dto;
pub mod error;
pub mod events;
pub mod requests;

pub use client::{HttpConfirmedCountProvider, HttpEventGateway};
pub use error::{ApiError, ErrorResponse};
pub use events::{event_rpc_router, EventRpcState};
pub use requests::{request_rpc_router, RequestRpcState};
