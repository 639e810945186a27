//! Participation command and query handlers.
//!
//! Every write goes through an event scope of the ledger.

// Command handlers
mod cancel_request;
mod moderate_requests;
mod request_to_join;

// Query handlers
mod list_event_requests;
mod list_user_requests;

pub use cancel_request::{CancelRequestCommand, CancelRequestHandler};
pub use list_event_requests::{ListEventRequestsHandler, ListEventRequestsQuery};
pub use list_user_requests::{ListUserRequestsHandler, ListUserRequestsQuery};
pub use moderate_requests::{ModerateRequestsCommand, ModerateRequestsHandler};
pub use request_to_join::{RequestToJoinCommand, RequestToJoinHandler};
