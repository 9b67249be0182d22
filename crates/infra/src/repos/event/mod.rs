mod inmemory;
mod postgres;

use connectu_domain::{Event, EventStatus, ID};
pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;

/// Persistence of `Event`s as far as their lifecycle is concerned
#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, e: &Event) -> anyhow::Result<()>;
    /// Sets the status of an existing `Event` to `to`, but only if it is
    /// currently `from`. Returns false if the stored status is a different one.
    async fn save_status(
        &self,
        event_id: &ID,
        from: EventStatus,
        to: EventStatus,
    ) -> anyhow::Result<bool>;
    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<Event>>;
    async fn find_by_statuses(&self, statuses: &[EventStatus]) -> anyhow::Result<Vec<Event>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn inmemory_save_status_and_find() {
        let repo = InMemoryEventRepo::new();
        let event = Event::new(1000);
        repo.insert(&event).await.unwrap();

        assert!(repo
            .save_status(&event.id, EventStatus::Upcoming, EventStatus::Live)
            .await
            .unwrap());

        let found = repo.find(&event.id).await.unwrap().expect("To find event");
        assert_eq!(found.status, EventStatus::Live);
        assert!(repo.find(&ID::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn inmemory_save_status_only_from_the_expected_status() {
        let repo = InMemoryEventRepo::new();
        let mut event = Event::new(1000);
        event.status = EventStatus::Cancelled;
        repo.insert(&event).await.unwrap();

        assert!(!repo
            .save_status(&event.id, EventStatus::Upcoming, EventStatus::Live)
            .await
            .unwrap());
        let found = repo.find(&event.id).await.unwrap().expect("To find event");
        assert_eq!(found.status, EventStatus::Cancelled);
    }

    #[tokio::test]
    async fn inmemory_save_status_of_unknown_event_fails() {
        let repo = InMemoryEventRepo::new();
        assert!(repo
            .save_status(&ID::new(), EventStatus::Upcoming, EventStatus::Live)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn inmemory_find_by_statuses() {
        let repo = InMemoryEventRepo::new();
        let upcoming = Event::new(1000);
        let mut live = Event::new(1000);
        live.status = EventStatus::Live;
        let mut cancelled = Event::new(1000);
        cancelled.status = EventStatus::Cancelled;
        for e in [&upcoming, &live, &cancelled] {
            repo.insert(e).await.unwrap();
        }

        let found = repo
            .find_by_statuses(&[EventStatus::Upcoming, EventStatus::Live])
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|e| e.id != cancelled.id));

        let found = repo.find_by_statuses(&[]).await.unwrap();
        assert!(found.is_empty());
    }
}
