//! In-memory participation ledger for tests and single-process deployments.
//!
//! Each event has its own async mutex; an [`InMemoryEventScope`] owns the
//! guard for its whole lifetime. Writes are staged in the scope and applied to
//! the shared map under one write lock at commit. Lock entries that nobody
//! holds or waits on are pruned, so the lock map only tracks events with
//! scopes in flight.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, EventId, RequestId, UserId};
use crate::domain::participation::{ParticipationRequest, RequestStatus};
use crate::ports::{ConfirmedCountProvider, EventScope, ParticipationLedger};

#[derive(Debug, Default)]
struct LedgerState {
    requests: HashMap<RequestId, ParticipationRequest>,
    /// Insertion order, for stable listings.
    order: Vec<RequestId>,
}

impl LedgerState {
    fn ordered(&self) -> impl Iterator<Item = &ParticipationRequest> {
        self.order.iter().filter_map(|id| self.requests.get(id))
    }
}

/// In-memory implementation of [`ParticipationLedger`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryParticipationLedger {
    state: Arc<RwLock<LedgerState>>,
    locks: Arc<Mutex<HashMap<EventId, Arc<Mutex<()>>>>>,
}

impl InMemoryParticipationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    async fn event_lock(&self, event_id: &EventId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        // Holders and waiters keep a clone; a count of one means idle.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks.entry(*event_id).or_default().clone()
    }

    #[cfg(test)]
    async fn tracked_locks(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[async_trait]
impl ParticipationLedger for InMemoryParticipationLedger {
    async fn open_scope(&self, event_id: &EventId) -> Result<Box<dyn EventScope>, DomainError> {
        let guard = self.event_lock(event_id).await.lock_owned().await;
        Ok(Box::new(InMemoryEventScope {
            event_id: *event_id,
            state: Arc::clone(&self.state),
            staged: HashMap::new(),
            staged_new: Vec::new(),
            _guard: guard,
        }))
    }

    async fn find_by_id(&self, id: &RequestId) -> Result<Option<ParticipationRequest>, DomainError> {
        Ok(self.state.read().await.requests.get(id).cloned())
    }

    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<ParticipationRequest>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .ordered()
            .filter(|r| &r.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn list_for_requester(
        &self,
        requester_id: &UserId,
    ) -> Result<Vec<ParticipationRequest>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .ordered()
            .filter(|r| &r.requester_id == requester_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ConfirmedCountProvider for InMemoryParticipationLedger {
    async fn batch_confirmed_counts(
        &self,
        event_ids: &[EventId],
    ) -> Result<HashMap<EventId, u64>, DomainError> {
        let state = self.state.read().await;
        let mut counts: HashMap<EventId, u64> = event_ids.iter().map(|id| (*id, 0)).collect();
        for request in state.requests.values() {
            if request.status == RequestStatus::Confirmed {
                if let Some(count) = counts.get_mut(&request.event_id) {
                    *count += 1;
                }
            }
        }
        Ok(counts)
    }
}

/// Serialized scope over one event's requests.
pub struct InMemoryEventScope {
    event_id: EventId,
    state: Arc<RwLock<LedgerState>>,
    staged: HashMap<RequestId, ParticipationRequest>,
    staged_new: Vec<RequestId>,
    _guard: OwnedMutexGuard<()>,
}

impl InMemoryEventScope {
    /// Committed requests of the scoped event overlaid with staged writes.
    async fn current_requests(&self) -> Vec<ParticipationRequest> {
        let state = self.state.read().await;
        let mut current: Vec<ParticipationRequest> = state
            .ordered()
            .filter(|r| r.event_id == self.event_id)
            .map(|r| self.staged.get(&r.id).unwrap_or(r).clone())
            .collect();
        current.extend(self.staged_new.iter().filter_map(|id| self.staged.get(id)).cloned());
        current
    }
}

#[async_trait]
impl EventScope for InMemoryEventScope {
    fn event_id(&self) -> EventId {
        self.event_id
    }

    async fn confirmed_count(&mut self) -> Result<u64, DomainError> {
        let count = self
            .current_requests()
            .await
            .iter()
            .filter(|r| r.status.occupies_slot())
            .count();
        Ok(count as u64)
    }

    async fn has_active_request(&mut self, requester_id: &UserId) -> Result<bool, DomainError> {
        Ok(self
            .current_requests()
            .await
            .iter()
            .any(|r| &r.requester_id == requester_id && r.is_active()))
    }

    async fn find_requests(&mut self, ids: &[RequestId]) -> Result<Vec<ParticipationRequest>, DomainError> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| self.staged.get(id).or_else(|| state.requests.get(id)))
            .cloned()
            .collect())
    }

    async fn insert(&mut self, request: &ParticipationRequest) -> Result<(), DomainError> {
        if request.is_active() && self.has_active_request(&request.requester_id).await? {
            return Err(DomainError::new(
                ErrorCode::DuplicateRequest,
                "Requester already has an active request for this event",
            )
            .with_detail("event_id", request.event_id.to_string())
            .with_detail("requester_id", request.requester_id.as_str()));
        }
        self.staged_new.push(request.id);
        self.staged.insert(request.id, request.clone());
        Ok(())
    }

    async fn update(&mut self, request: &ParticipationRequest) -> Result<(), DomainError> {
        let known = self.staged.contains_key(&request.id)
            || self.state.read().await.requests.contains_key(&request.id);
        if !known {
            return Err(DomainError::new(
                ErrorCode::RequestNotFound,
                format!("Request {} not found", request.id),
            ));
        }
        self.staged.insert(request.id, request.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let scope = *self;
        let mut state = scope.state.write().await;
        state.order.extend(scope.staged_new.iter().copied());
        state.requests.extend(scope.staged);
        Ok(())
    }
}
