//! Participation request status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, ValidationError};

/// Status of a participation request.
///
/// CONFIRMED and REJECTED are final as far as moderation is concerned; the
/// requester may still withdraw, which moves any status to CANCELED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Confirmed,
    Rejected,
    Canceled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Confirmed => "CONFIRMED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Canceled => "CANCELED",
        }
    }

    /// Active requests block a second request by the same user for the same event.
    pub fn is_active(&self) -> bool {
        !matches!(self, RequestStatus::Canceled)
    }

    /// Counts against the event's participant limit.
    pub fn occupies_slot(&self) -> bool {
        matches!(self, RequestStatus::Confirmed)
    }
}

impl StateMachine for RequestStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RequestStatus::*;
        matches!(
            (self, target),
            (Pending, Confirmed)
                | (Pending, Rejected)
                | (Pending, Canceled)
                | (Confirmed, Canceled)
                | (Rejected, Canceled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RequestStatus::*;
        match self {
            Pending => vec![Confirmed, Rejected, Canceled],
            Confirmed | Rejected => vec![Canceled],
            Canceled => vec![],
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(RequestStatus::Pending),
            "CONFIRMED" => Ok(RequestStatus::Confirmed),
            "REJECTED" => Ok(RequestStatus::Rejected),
            "CANCELED" => Ok(RequestStatus::Canceled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown request status '{}'", other),
            )),
        }
    }
}
