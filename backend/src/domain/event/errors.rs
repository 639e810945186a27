//! Event lifecycle errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ErrorKind, EventId, UserId, ValidationError};

use super::{EventState, StateAction};

/// Errors raised while creating, editing or moving an event through its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("Event {0} not found")]
    NotFound(EventId),

    #[error("User {0} not found")]
    UserNotFound(UserId),

    #[error("Cannot apply {action} to event {event_id} in state {from}")]
    InvalidTransition {
        event_id: EventId,
        from: EventState,
        action: StateAction,
    },

    #[error("Event date must be at least {min_hours}h in the future")]
    TooSoon { min_hours: i64 },

    #[error("Event {0} is published and can no longer be changed")]
    Immutable(EventId),

    #[error("Action {0} is not permitted for this caller")]
    ActionNotAllowed(StateAction),

    #[error("Event {0} was modified concurrently")]
    ConcurrentModification(EventId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Infrastructure(String),
}

impl EventError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EventError::NotFound(_) => ErrorCode::EventNotFound,
            EventError::UserNotFound(_) => ErrorCode::UserNotFound,
            EventError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            EventError::TooSoon { .. } => ErrorCode::EventTooSoon,
            EventError::Immutable(_) => ErrorCode::EventImmutable,
            EventError::ActionNotAllowed(_) => ErrorCode::InvalidStateAction,
            EventError::ConcurrentModification(_) => ErrorCode::ConcurrentModification,
            EventError::Validation(err) => DomainError::from(err.clone()).code,
            EventError::Unavailable(_) => ErrorCode::ServiceUnavailable,
            EventError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    /// Message safe to hand to callers; infrastructure details stay in logs.
    pub fn message(&self) -> String {
        match self {
            EventError::Infrastructure(_) => "Internal error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<DomainError> for EventError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ServiceUnavailable => EventError::Unavailable(err.message),
            ErrorCode::EventNotFound => match err.details.get("event_id").and_then(|id| id.parse().ok()) {
                Some(id) => EventError::NotFound(id),
                None => EventError::Infrastructure(err.to_string()),
            },
            ErrorCode::ConcurrentModification => {
                match err.details.get("event_id").and_then(|id| id.parse().ok()) {
                    Some(id) => EventError::ConcurrentModification(id),
                    None => EventError::Infrastructure(err.to_string()),
                }
            }
            _ => EventError::Infrastructure(err.to_string()),
        }
    }
}

impl From<EventError> for DomainError {
    fn from(err: EventError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_violations_are_conflicts() {
        let err = EventError::InvalidTransition {
            event_id: EventId::new(),
            from: EventState::Published,
            action: StateAction::RejectEvent,
        };
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.to_string().contains("REJECT_EVENT"));
        assert_eq!(EventError::TooSoon { min_hours: 1 }.kind(), ErrorKind::Conflict);
        assert_eq!(EventError::Immutable(EventId::new()).kind(), ErrorKind::Conflict);
    }

    #[test]
    fn admin_action_from_initiator_is_bad_request() {
        let err = EventError::ActionNotAllowed(StateAction::PublishEvent);
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn validation_keeps_its_specific_code() {
        let err: EventError = ValidationError::out_of_range("participant_limit", 0, 10, -1).into();
        assert_eq!(err.code(), ErrorCode::OutOfRange);
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn unavailable_domain_error_stays_unavailable() {
        let err: EventError = DomainError::unavailable("event service timed out").into();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
    }

    #[test]
    fn concurrent_modification_survives_port_boundary() {
        let id = EventId::new();
        let domain = DomainError::new(ErrorCode::ConcurrentModification, "stale version")
            .with_detail("event_id", id.to_string());
        assert_eq!(EventError::from(domain), EventError::ConcurrentModification(id));
    }

    #[test]
    fn infrastructure_message_is_generic() {
        let err = EventError::Infrastructure("connection refused on 10.0.0.3".to_string());
        assert_eq!(err.message(), "Internal error");
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
