//! Participation-specific error types.
//!
//! # Kind Mapping
//!
//! | Error | Kind |
//! |-------|------|
//! | EventNotFound / RequestNotFound / UserNotFound | NotFound |
//! | SelfParticipation / EventNotPublished / DuplicateRequest | Conflict |
//! | ParticipantLimitReached / NotInitiator / ModerationNotApplicable | Conflict |
//! | RequestNotPending / RequestEventMismatch / InvalidTransition | Conflict |
//! | InvalidDecision / InvalidBatch / ValidationFailed | BadRequest |
//! | Unavailable | Unavailable |
//! | Infrastructure | Internal |

use crate::domain::foundation::{
    DomainError, ErrorCode, ErrorKind, EventId, RequestId, UserId, ValidationError,
};

use super::RequestStatus;

/// Participation-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipationError {
    /// Event does not exist.
    EventNotFound(EventId),

    /// Request does not exist, or is not visible to the caller.
    RequestNotFound(RequestId),

    /// User does not exist.
    UserNotFound(UserId),

    /// Initiators cannot join their own event.
    SelfParticipation(EventId),

    /// Event is not open for participation.
    EventNotPublished(EventId),

    /// User already holds an active request for this event.
    DuplicateRequest { event_id: EventId, requester_id: UserId },

    /// No free slot left.
    ParticipantLimitReached { event_id: EventId, limit: u32 },

    /// Caller is not the event's initiator.
    NotInitiator(EventId),

    /// Event confirms requests automatically; there is nothing to moderate.
    ModerationNotApplicable(EventId),

    /// Request was already decided.
    RequestNotPending { request_id: RequestId, status: RequestStatus },

    /// Request belongs to a different event than the one being moderated.
    RequestEventMismatch { request_id: RequestId, event_id: EventId },

    /// Status table forbids the move.
    InvalidTransition {
        request_id: RequestId,
        from: RequestStatus,
        to: RequestStatus,
    },

    /// Moderation target other than CONFIRMED or REJECTED.
    InvalidDecision(String),

    /// Malformed batch, e.g. a repeated id.
    InvalidBatch(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// A collaborator service could not be reached.
    Unavailable(String),

    /// Infrastructure error.
    Infrastructure(String),
}

impl ParticipationError {
    pub fn invalid_batch(reason: impl Into<String>) -> Self {
        ParticipationError::InvalidBatch(reason.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        ParticipationError::Unavailable(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ParticipationError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ParticipationError::EventNotFound(_) => ErrorCode::EventNotFound,
            ParticipationError::RequestNotFound(_) => ErrorCode::RequestNotFound,
            ParticipationError::UserNotFound(_) => ErrorCode::UserNotFound,
            ParticipationError::SelfParticipation(_) => ErrorCode::SelfParticipation,
            ParticipationError::EventNotPublished(_) => ErrorCode::EventNotPublished,
            ParticipationError::DuplicateRequest { .. } => ErrorCode::DuplicateRequest,
            ParticipationError::ParticipantLimitReached { .. } => ErrorCode::ParticipantLimitReached,
            ParticipationError::NotInitiator(_) => ErrorCode::NotInitiator,
            ParticipationError::ModerationNotApplicable(_) => ErrorCode::ModerationNotApplicable,
            ParticipationError::RequestNotPending { .. } => ErrorCode::RequestNotPending,
            ParticipationError::RequestEventMismatch { .. } => ErrorCode::RequestEventMismatch,
            ParticipationError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            ParticipationError::InvalidDecision(_) => ErrorCode::InvalidStatus,
            ParticipationError::InvalidBatch(_) => ErrorCode::ValidationFailed,
            ParticipationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ParticipationError::Unavailable(_) => ErrorCode::ServiceUnavailable,
            ParticipationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.code().kind()
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            ParticipationError::EventNotFound(id) => format!("Event {} not found", id),
            ParticipationError::RequestNotFound(id) => format!("Request {} not found", id),
            ParticipationError::UserNotFound(id) => format!("User {} not found", id),
            ParticipationError::SelfParticipation(id) => {
                format!("Initiator cannot request to join own event {}", id)
            }
            ParticipationError::EventNotPublished(id) => format!("Event {} is not published", id),
            ParticipationError::DuplicateRequest {
                event_id,
                requester_id,
            } => format!(
                "User {} already has an active request for event {}",
                requester_id, event_id
            ),
            ParticipationError::ParticipantLimitReached { event_id, limit } => {
                format!("Event {} reached its participant limit of {}", event_id, limit)
            }
            ParticipationError::NotInitiator(id) => {
                format!("Only the initiator of event {} can do this", id)
            }
            ParticipationError::ModerationNotApplicable(id) => {
                format!("Event {} does not moderate participation requests", id)
            }
            ParticipationError::RequestNotPending { request_id, status } => {
                format!("Request {} is {}, not PENDING", request_id, status)
            }
            ParticipationError::RequestEventMismatch {
                request_id,
                event_id,
            } => format!("Request {} does not belong to event {}", request_id, event_id),
            ParticipationError::InvalidTransition {
                request_id,
                from,
                to,
            } => format!("Request {} cannot move from {} to {}", request_id, from, to),
            ParticipationError::InvalidDecision(value) => {
                format!("Moderation target must be CONFIRMED or REJECTED, got '{}'", value)
            }
            ParticipationError::InvalidBatch(reason) => format!("Invalid batch: {}", reason),
            ParticipationError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ParticipationError::Unavailable(msg) => format!("Service unavailable: {}", msg),
            ParticipationError::Infrastructure(_) => "Internal error".to_string(),
        }
    }
}

impl std::fmt::Display for ParticipationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Logged, never returned verbatim to callers.
            ParticipationError::Infrastructure(msg) => write!(f, "Infrastructure error: {}", msg),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for ParticipationError {}

impl From<ValidationError> for ParticipationError {
    fn from(err: ValidationError) -> Self {
        ParticipationError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for ParticipationError {
    fn from(err: DomainError) -> Self {
        let event_id = err.details.get("event_id").and_then(|id| id.parse::<EventId>().ok());
        let requester_id = err
            .details
            .get("requester_id")
            .and_then(|id| UserId::new(id.clone()).ok());

        match (err.code, event_id, requester_id) {
            (ErrorCode::ServiceUnavailable, _, _) => ParticipationError::Unavailable(err.message),
            (ErrorCode::EventNotFound, Some(event_id), _) => {
                ParticipationError::EventNotFound(event_id)
            }
            (ErrorCode::DuplicateRequest, Some(event_id), Some(requester_id)) => {
                ParticipationError::DuplicateRequest {
                    event_id,
                    requester_id,
                }
            }
            (code, _, _) if code.kind() == ErrorKind::BadRequest => {
                ParticipationError::ValidationFailed {
                    field: err.details.get("field").cloned().unwrap_or_default(),
                    message: err.message,
                }
            }
            _ => ParticipationError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ParticipationError> for DomainError {
    fn from(err: ParticipationError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
