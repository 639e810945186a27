//! Event command and query handlers.
//!
//! Handlers for the publication lifecycle and attendance reads.

// Command handlers
mod change_event_state;
mod create_event;
mod update_event;

// Query handlers
mod get_event_attendance;

pub use change_event_state::{ChangeEventStateCommand, ChangeEventStateHandler};
pub use create_event::{CreateEventCommand, CreateEventHandler};
pub use get_event_attendance::{EventAttendance, GetEventAttendanceHandler, GetEventAttendanceQuery};
pub use update_event::{UpdateEventCommand, UpdateEventHandler};
