//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Coarse failure classes surfaced to callers.
///
/// Every [`ErrorCode`] belongs to exactly one kind; transports map kinds to
/// their own status vocabulary (HTTP status codes for the RPC routers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Referenced event, request or user does not exist.
    NotFound,
    /// Business-rule violation.
    Conflict,
    /// Malformed input.
    BadRequest,
    /// An owning collaborator could not be reached.
    Unavailable,
    /// Unexpected internal failure; details are not exposed.
    Internal,
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,
    InvalidStatus,
    InvalidStateAction,

    // Not found errors
    EventNotFound,
    RequestNotFound,
    UserNotFound,

    // Business rule errors
    InvalidStateTransition,
    EventTooSoon,
    EventNotPublished,
    EventImmutable,
    SelfParticipation,
    DuplicateRequest,
    ParticipantLimitReached,
    NotInitiator,
    ModerationNotApplicable,
    RequestNotPending,
    RequestEventMismatch,
    ConcurrentModification,

    // Infrastructure errors
    ServiceUnavailable,
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Returns the failure class this code belongs to.
    pub fn kind(&self) -> ErrorKind {
        use ErrorCode::*;
        match self {
            ValidationFailed | EmptyField | OutOfRange | InvalidFormat | InvalidStatus
            | InvalidStateAction => ErrorKind::BadRequest,
            EventNotFound | RequestNotFound | UserNotFound => ErrorKind::NotFound,
            InvalidStateTransition
            | EventTooSoon
            | EventNotPublished
            | EventImmutable
            | SelfParticipation
            | DuplicateRequest
            | ParticipantLimitReached
            | NotInitiator
            | ModerationNotApplicable
            | RequestNotPending
            | RequestEventMismatch
            | ConcurrentModification => ErrorKind::Conflict,
            ServiceUnavailable => ErrorKind::Unavailable,
            DatabaseError | InternalError => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidStatus => "INVALID_STATUS",
            ErrorCode::InvalidStateAction => "INVALID_STATE_ACTION",
            ErrorCode::EventNotFound => "EVENT_NOT_FOUND",
            ErrorCode::RequestNotFound => "REQUEST_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::EventTooSoon => "EVENT_TOO_SOON",
            ErrorCode::EventNotPublished => "EVENT_NOT_PUBLISHED",
            ErrorCode::EventImmutable => "EVENT_IMMUTABLE",
            ErrorCode::SelfParticipation => "SELF_PARTICIPATION",
            ErrorCode::DuplicateRequest => "DUPLICATE_REQUEST",
            ErrorCode::ParticipantLimitReached => "PARTICIPANT_LIMIT_REACHED",
            ErrorCode::NotInitiator => "NOT_INITIATOR",
            ErrorCode::ModerationNotApplicable => "MODERATION_NOT_APPLICABLE",
            ErrorCode::RequestNotPending => "REQUEST_NOT_PENDING",
            ErrorCode::RequestEventMismatch => "REQUEST_EVENT_MISMATCH",
            ErrorCode::ConcurrentModification => "CONCURRENT_MODIFICATION",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// This is the error type that crosses port boundaries.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Creates an error for an unreachable collaborator.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Creates a storage failure.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns the failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
        };
        let field = err.field().to_string();
        DomainError::new(code, err.to_string()).with_detail("field", field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("user_id");
        assert_eq!(format!("{}", err), "Field 'user_id' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("participant_limit", 0, i64::from(u32::MAX), -1);
        assert!(format!("{}", err).contains("got -1"));
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::EventNotFound, "Event not found");
        assert_eq!(format!("{}", err), "[EVENT_NOT_FOUND] Event not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::validation("status", "unknown value");
        assert_eq!(err.details.get("field"), Some(&"status".to_string()));
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn codes_map_to_expected_kinds() {
        assert_eq!(ErrorCode::EventNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ErrorCode::ParticipantLimitReached.kind(), ErrorKind::Conflict);
        assert_eq!(ErrorCode::ConcurrentModification.kind(), ErrorKind::Conflict);
        assert_eq!(ErrorCode::InvalidStatus.kind(), ErrorKind::BadRequest);
        assert_eq!(ErrorCode::ServiceUnavailable.kind(), ErrorKind::Unavailable);
        assert_eq!(ErrorCode::DatabaseError.kind(), ErrorKind::Internal);
    }

    #[test]
    fn validation_error_converts_to_bad_request() {
        let err: DomainError = ValidationError::empty_field("user_id").into();
        assert_eq!(err.code, ErrorCode::EmptyField);
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }
}
