//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod event;
pub mod participation;

pub use event::{
    ChangeEventStateCommand, ChangeEventStateHandler, CreateEventCommand, CreateEventHandler,
    EventAttendance, GetEventAttendanceHandler, GetEventAttendanceQuery, UpdateEventCommand,
    UpdateEventHandler,
};
pub use participation::{
    CancelRequestCommand, CancelRequestHandler, ListEventRequestsHandler, ListEventRequestsQuery,
    ListUserRequestsHandler, ListUserRequestsQuery, ModerateRequestsCommand,
    ModerateRequestsHandler, RequestToJoinCommand, RequestToJoinHandler,
};
