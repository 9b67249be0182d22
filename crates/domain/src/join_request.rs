use crate::shared::entity::{Entity, ID};

/// A pending request from a `User` to participate in an `Event`.
/// All of them are removed once the `Event` has finished.
#[derive(Debug, Clone, PartialEq)]
pub struct EventJoinRequest {
    pub id: ID,
    pub event_id: ID,
    pub user_id: ID,
    pub created: i64,
}

impl EventJoinRequest {
    pub fn new(event_id: ID, user_id: ID, created: i64) -> Self {
        Self {
            id: Default::default(),
            event_id,
            user_id,
            created,
        }
    }
}

impl Entity for EventJoinRequest {
    fn id(&self) -> &ID {
        &self.id
    }
}
