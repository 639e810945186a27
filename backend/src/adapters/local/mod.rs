//! In-process adapters used when events and requests share one deployment.

mod event_gateway;

pub use event_gateway::LocalEventGateway;
