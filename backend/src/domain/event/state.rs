//! Event publication state machine.
//!
//! ```text
//!               PUBLISH_EVENT
//!   PENDING ─────────────────────► PUBLISHED (terminal)
//!    ▲   │
//!    │   │ CANCEL_REVIEW / REJECT_EVENT
//!    │   ▼
//!   CANCELED
//!    (SEND_TO_REVIEW back to PENDING)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, ValidationError};

/// Publication state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventState {
    /// Awaiting admin review. Initial state.
    Pending,

    /// Visible and open for participation requests. Terminal.
    Published,

    /// Rejected by an admin or withdrawn by the initiator.
    Canceled,
}

impl EventState {
    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventState::Pending => "PENDING",
            EventState::Published => "PUBLISHED",
            EventState::Canceled => "CANCELED",
        }
    }

    /// True while content edits are still allowed.
    pub fn is_editable(&self) -> bool {
        !matches!(self, EventState::Published)
    }
}

impl StateMachine for EventState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use EventState::*;
        matches!(
            (self, target),
            (Pending, Published)
                | (Pending, Canceled)
                | (Pending, Pending)
                | (Canceled, Pending)
                | (Canceled, Canceled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use EventState::*;
        match self {
            Pending => vec![Published, Canceled, Pending],
            Canceled => vec![Pending, Canceled],
            Published => vec![],
        }
    }
}

impl fmt::Display for EventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(EventState::Pending),
            "PUBLISHED" => Ok(EventState::Published),
            "CANCELED" => Ok(EventState::Canceled),
            other => Err(ValidationError::invalid_format(
                "state",
                format!("unknown event state '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EventState; 3] = [EventState::Pending, EventState::Published, EventState::Canceled];

    #[test]
    fn pending_can_be_published() {
        assert_eq!(
            EventState::Pending.transition_to(EventState::Published),
            Ok(EventState::Published)
        );
    }

    #[test]
    fn canceled_cannot_be_published_directly() {
        assert!(EventState::Canceled.transition_to(EventState::Published).is_err());
    }

    #[test]
    fn canceled_and_pending_are_mutually_reachable() {
        assert!(EventState::Canceled.can_transition_to(&EventState::Pending));
        assert!(EventState::Pending.can_transition_to(&EventState::Canceled));
    }

    #[test]
    fn published_is_terminal() {
        assert!(EventState::Published.is_terminal());
        for target in ALL {
            assert!(!EventState::Published.can_transition_to(&target));
        }
    }

    #[test]
    fn valid_transitions_are_consistent_with_can_transition_to() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn parses_and_renders_wire_names() {
        for state in ALL {
            assert_eq!(state.as_str().parse::<EventState>().unwrap(), state);
        }
        assert!("DRAFT".parse::<EventState>().is_err());
    }

    #[test]
    fn serializes_as_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&EventState::Published).unwrap(), "\"PUBLISHED\"");
    }
}
