//! Lifecycle actions requested by admins and initiators.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{IllegalTransition, StateMachine, ValidationError};

use super::EventState;

/// Who is asking for a lifecycle change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorRole {
    Admin,
    Initiator,
}

/// A requested change of an event's publication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StateAction {
    PublishEvent,
    RejectEvent,
    SendToReview,
    CancelReview,
}

impl StateAction {
    /// State the event ends up in when the action succeeds.
    pub fn target(&self) -> EventState {
        match self {
            StateAction::PublishEvent => EventState::Published,
            StateAction::RejectEvent | StateAction::CancelReview => EventState::Canceled,
            StateAction::SendToReview => EventState::Pending,
        }
    }

    /// Role allowed to issue this action.
    pub fn role(&self) -> ActorRole {
        match self {
            StateAction::PublishEvent | StateAction::RejectEvent => ActorRole::Admin,
            StateAction::SendToReview | StateAction::CancelReview => ActorRole::Initiator,
        }
    }

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StateAction::PublishEvent => "PUBLISH_EVENT",
            StateAction::RejectEvent => "REJECT_EVENT",
            StateAction::SendToReview => "SEND_TO_REVIEW",
            StateAction::CancelReview => "CANCEL_REVIEW",
        }
    }
}

impl EventState {
    /// The lifecycle transition table.
    ///
    /// Every state change of an event goes through here; the date rule of
    /// `PUBLISH_EVENT` is checked by the aggregate because it needs the clock.
    pub fn apply(self, action: StateAction) -> Result<EventState, IllegalTransition<EventState>> {
        self.transition_to(action.target())
    }
}

impl fmt::Display for StateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PUBLISH_EVENT" => Ok(StateAction::PublishEvent),
            "REJECT_EVENT" => Ok(StateAction::RejectEvent),
            "SEND_TO_REVIEW" => Ok(StateAction::SendToReview),
            "CANCEL_REVIEW" => Ok(StateAction::CancelReview),
            other => Err(ValidationError::invalid_format(
                "state_action",
                format!("unknown state action '{}'", other),
            )),
        }
    }
}
