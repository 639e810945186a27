//! GetEventAttendanceHandler - Query handler enriching events with attendance.
//!
//! Confirmed counts come from the request-owning side in one batched call,
//! whether that side is local or remote.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::event::{Event, EventError};
use crate::domain::foundation::EventId;
use crate::ports::{ConfirmedCountProvider, EventRepository};

/// Query for attendance figures of several events.
#[derive(Debug, Clone)]
pub struct GetEventAttendanceQuery {
    pub event_ids: Vec<EventId>,
    /// Drop events whose cap is already reached.
    pub only_available: bool,
}

/// An event together with its attendance figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventAttendance {
    pub event: Event,
    pub confirmed_count: u64,
    /// `None` for unlimited events.
    pub available_slots: Option<u64>,
}

impl EventAttendance {
    pub fn has_free_slot(&self) -> bool {
        !self.event.participant_limit.is_reached(self.confirmed_count)
    }
}

/// Handler for attendance enrichment.
///
/// Unknown ids are skipped. Results follow the order of the query ids.
pub struct GetEventAttendanceHandler {
    events: Arc<dyn EventRepository>,
    confirmed_counts: Arc<dyn ConfirmedCountProvider>,
}

impl GetEventAttendanceHandler {
    pub fn new(
        events: Arc<dyn EventRepository>,
        confirmed_counts: Arc<dyn ConfirmedCountProvider>,
    ) -> Self {
        Self {
            events,
            confirmed_counts,
        }
    }

    pub async fn handle(
        &self,
        query: GetEventAttendanceQuery,
    ) -> Result<Vec<EventAttendance>, EventError> {
        if query.event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let events = self.events.find_many(&query.event_ids).await?;
        let ids: Vec<EventId> = events.iter().map(|e| e.id).collect();
        let counts = self.confirmed_counts.batch_confirmed_counts(&ids).await?;

        let attendance = events
            .into_iter()
            .map(|event| {
                let confirmed_count = counts.get(&event.id).copied().unwrap_or(0);
                let available_slots = event.participant_limit.remaining(confirmed_count);
                EventAttendance {
                    event,
                    confirmed_count,
                    available_slots,
                }
            })
            .filter(|a| !query.only_available || a.has_free_slot())
            .collect();

        Ok(attendance)
    }
}
