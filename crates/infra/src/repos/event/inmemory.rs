use super::IEventRepo;
use crate::repos::shared::inmemory_repo::*;
use connectu_domain::{Event, EventStatus, ID};

pub struct InMemoryEventRepo {
    events: std::sync::Mutex<Vec<Event>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryEventRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        insert(e, &self.events);
        Ok(())
    }

    async fn save_status(
        &self,
        event_id: &ID,
        from: EventStatus,
        to: EventStatus,
    ) -> anyhow::Result<bool> {
        let updated = update(event_id, &self.events, |event| {
            if event.status != from {
                return false;
            }
            event.status = to;
            true
        });
        updated.ok_or_else(|| anyhow::anyhow!("Event with id: {} does not exist", event_id))
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<Event>> {
        Ok(find(event_id, &self.events))
    }

    async fn find_by_statuses(&self, statuses: &[EventStatus]) -> anyhow::Result<Vec<Event>> {
        Ok(find_by(&self.events, |event| statuses.contains(&event.status)))
    }
}
