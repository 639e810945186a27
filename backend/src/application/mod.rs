//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Event handlers
    ChangeEventStateCommand, ChangeEventStateHandler, CreateEventCommand, CreateEventHandler,
    EventAttendance, GetEventAttendanceHandler, GetEventAttendanceQuery, UpdateEventCommand,
    UpdateEventHandler,
    // Participation handlers
    CancelRequestCommand, CancelRequestHandler, ListEventRequestsHandler, ListEventRequestsQuery,
    ListUserRequestsHandler, ListUserRequestsQuery, ModerateRequestsCommand,
    ModerateRequestsHandler, RequestToJoinCommand, RequestToJoinHandler,
};
