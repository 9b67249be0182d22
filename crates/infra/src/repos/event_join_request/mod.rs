mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use connectu_domain::{EventJoinRequest, ID};
pub use inmemory::InMemoryEventJoinRequestRepo;
pub use postgres::PostgresEventJoinRequestRepo;

#[async_trait::async_trait]
pub trait IEventJoinRequestRepo: Send + Sync {
    async fn insert(&self, request: &EventJoinRequest) -> anyhow::Result<()>;
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<EventJoinRequest>>;
    /// Removes every pending request for the given `Event`
    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult>;
}
