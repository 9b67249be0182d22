use super::IEventJoinRequestRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use connectu_domain::{EventJoinRequest, ID};

pub struct InMemoryEventJoinRequestRepo {
    join_requests: std::sync::Mutex<Vec<EventJoinRequest>>,
}

impl InMemoryEventJoinRequestRepo {
    pub fn new() -> Self {
        Self {
            join_requests: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryEventJoinRequestRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEventJoinRequestRepo for InMemoryEventJoinRequestRepo {
    async fn insert(&self, request: &EventJoinRequest) -> anyhow::Result<()> {
        insert(request, &self.join_requests);
        Ok(())
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<EventJoinRequest>> {
        Ok(find_by(&self.join_requests, |r| r.event_id == *event_id))
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.join_requests, |r| r.event_id == *event_id))
    }
}
