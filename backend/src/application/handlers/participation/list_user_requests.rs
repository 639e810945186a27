//! ListUserRequestsHandler - Query handler for a user's own join requests.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::participation::{ParticipationError, ParticipationRequest};
use crate::ports::{ParticipationLedger, UserDirectory};

/// Query for every request a user has made, across events.
#[derive(Debug, Clone)]
pub struct ListUserRequestsQuery {
    pub requester_id: UserId,
}

pub struct ListUserRequestsHandler {
    users: Arc<dyn UserDirectory>,
    ledger: Arc<dyn ParticipationLedger>,
}

impl ListUserRequestsHandler {
    pub fn new(users: Arc<dyn UserDirectory>, ledger: Arc<dyn ParticipationLedger>) -> Self {
        Self { users, ledger }
    }

    pub async fn handle(
        &self,
        query: ListUserRequestsQuery,
    ) -> Result<Vec<ParticipationRequest>, ParticipationError> {
        if !self.users.exists(&query.requester_id).await? {
            return Err(ParticipationError::UserNotFound(query.requester_id));
        }
        Ok(self.ledger.list_for_requester(&query.requester_id).await?)
    }
}
