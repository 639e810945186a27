//! Attendance cap of an event.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Maximum number of CONFIRMED participants. Zero means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantLimit(u32);

impl ParticipantLimit {
    /// No cap on confirmed participants.
    pub const UNLIMITED: ParticipantLimit = ParticipantLimit(0);

    pub fn new(limit: u32) -> Self {
        Self(limit)
    }

    /// Builds a limit from untrusted input, rejecting negative values.
    pub fn try_from_i64(limit: i64) -> Result<Self, ValidationError> {
        u32::try_from(limit)
            .map(Self)
            .map_err(|_| ValidationError::out_of_range("participant_limit", 0, i64::from(u32::MAX), limit))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_unlimited(&self) -> bool {
        self.0 == 0
    }

    /// True when `confirmed` participants leave no free slot.
    pub fn is_reached(&self, confirmed: u64) -> bool {
        !self.is_unlimited() && confirmed >= u64::from(self.0)
    }

    /// Free slots left, or `None` when unlimited.
    pub fn remaining(&self, confirmed: u64) -> Option<u64> {
        if self.is_unlimited() {
            None
        } else {
            Some(u64::from(self.0).saturating_sub(confirmed))
        }
    }
}

impl fmt::Display for ParticipantLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unlimited() {
            write!(f, "unlimited")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
