//! Event aggregate.
//!
//! An event is created PENDING by its initiator, reviewed by an admin and,
//! once PUBLISHED, frozen: no further state change or content edit is allowed.
//!
//! # Design Decisions
//!
//! - **Never deleted**: rejection and withdrawal both land in CANCELED
//! - **Single transition table**: every state change goes through [`EventState::apply`]
//! - **Optimistic locking**: `version` is bumped by the repository on each update

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, Timestamp, UserId, ValidationError};

use super::{EventError, EventSnapshot, EventState, ParticipantLimit, StateAction};

/// Minimum lead time between publication and the event start.
pub const MIN_HOURS_BEFORE_PUBLICATION: i64 = 1;

/// Minimum lead time between creating or rescheduling an event and its start.
pub const MIN_HOURS_BEFORE_SCHEDULING: i64 = 2;

/// Editable content of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub event_date: Timestamp,
    pub participant_limit: ParticipantLimit,
    pub moderation_enabled: bool,
}

/// Partial update submitted by the initiator. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventChanges {
    pub title: Option<String>,
    pub event_date: Option<Timestamp>,
    pub participant_limit: Option<ParticipantLimit>,
    pub moderation_enabled: Option<bool>,
}

impl EventChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.event_date.is_none()
            && self.participant_limit.is_none()
            && self.moderation_enabled.is_none()
    }
}

/// Event aggregate.
///
/// # Invariants
///
/// - `published_at` is `Some` iff the event has been PUBLISHED
/// - `participant_limit`, `moderation_enabled` and `initiator_id` never change
///   after publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,

    /// User who created the event and moderates its requests.
    pub initiator_id: UserId,

    pub title: String,

    pub event_date: Timestamp,

    pub participant_limit: ParticipantLimit,

    /// Whether join requests wait for the initiator's decision.
    pub moderation_enabled: bool,

    pub state: EventState,

    pub created_at: Timestamp,

    /// Set once, on publication.
    pub published_at: Option<Timestamp>,

    /// Optimistic lock counter.
    pub version: u32,
}

impl Event {
    /// Creates a PENDING event.
    ///
    /// # Errors
    ///
    /// - `Validation` if the title is blank
    /// - `TooSoon` if the event starts less than two hours after `now`
    pub fn create(
        id: EventId,
        initiator_id: UserId,
        draft: EventDraft,
        now: Timestamp,
    ) -> Result<Self, EventError> {
        let title = validate_title(draft.title)?;
        ensure_lead_time(draft.event_date, now, MIN_HOURS_BEFORE_SCHEDULING)?;

        Ok(Self {
            id,
            initiator_id,
            title,
            event_date: draft.event_date,
            participant_limit: draft.participant_limit,
            moderation_enabled: draft.moderation_enabled,
            state: EventState::Pending,
            created_at: now,
            published_at: None,
            version: 0,
        })
    }

    /// Applies a lifecycle action.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the transition table forbids the move
    /// - `TooSoon` when publishing an event starting within the next hour
    pub fn apply_action(&mut self, action: StateAction, now: Timestamp) -> Result<(), EventError> {
        let next = self
            .state
            .apply(action)
            .map_err(|_| EventError::InvalidTransition {
                event_id: self.id,
                from: self.state,
                action,
            })?;

        if action == StateAction::PublishEvent {
            ensure_lead_time(self.event_date, now, MIN_HOURS_BEFORE_PUBLICATION)?;
            self.published_at = Some(now);
        }

        self.state = next;
        Ok(())
    }

    /// Applies content edits from the initiator.
    ///
    /// # Errors
    ///
    /// - `Immutable` once published
    /// - `TooSoon` if the new date is less than two hours after `now`
    pub fn apply_changes(&mut self, changes: EventChanges, now: Timestamp) -> Result<(), EventError> {
        if !self.state.is_editable() {
            return Err(EventError::Immutable(self.id));
        }

        if let Some(date) = changes.event_date {
            ensure_lead_time(date, now, MIN_HOURS_BEFORE_SCHEDULING)?;
            self.event_date = date;
        }
        if let Some(title) = changes.title {
            self.title = validate_title(title)?;
        }
        if let Some(limit) = changes.participant_limit {
            self.participant_limit = limit;
        }
        if let Some(moderation) = changes.moderation_enabled {
            self.moderation_enabled = moderation;
        }
        Ok(())
    }

    pub fn is_published(&self) -> bool {
        self.state == EventState::Published
    }

    pub fn is_initiated_by(&self, user: &UserId) -> bool {
        &self.initiator_id == user
    }

    pub fn snapshot(&self) -> EventSnapshot {
        EventSnapshot {
            id: self.id,
            initiator_id: self.initiator_id.clone(),
            state: self.state,
            event_date: self.event_date,
            participant_limit: self.participant_limit,
            moderation_enabled: self.moderation_enabled,
        }
    }
}

fn validate_title(title: String) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    Ok(trimmed.to_string())
}

fn ensure_lead_time(date: Timestamp, now: Timestamp, min_hours: i64) -> Result<(), EventError> {
    if date.is_before(&now.plus_hours(min_hours)) {
        return Err(EventError::TooSoon { min_hours });
    }
    Ok(())
}
