//! State machine trait for status enums.
//!
//! Event lifecycle states and participation request statuses are closed enums
//! whose legal moves live in one transition table per type. Callers never
//! assign a status directly; they ask the table via [`StateMachine::transition_to`].

use std::fmt;

/// A rejected move between two states of a [`StateMachine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalTransition<S> {
    pub from: S,
    pub to: S,
}

impl<S: fmt::Debug> fmt::Display for IllegalTransition<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot transition from {:?} to {:?}", self.from, self.to)
    }
}

impl<S: fmt::Debug> std::error::Error for IllegalTransition<S> {}

/// Trait for status enums that represent state machines.
///
/// Implementors define the transition table; validated transitions and
/// terminal detection come for free.
pub trait StateMachine: Sized + Copy + PartialEq + fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, IllegalTransition<Self>> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(IllegalTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
