//! Internal RPC surface of the request-owning service.

mod handlers;
mod routes;

pub use handlers::{get_confirmed_counts, RequestRpcState};
pub use routes::request_rpc_router;
