//! Internal RPC surface of the event-owning service.

mod handlers;
mod routes;

pub use handlers::{get_event, EventRpcState};
pub use routes::event_rpc_router;
