mod event;
mod event_join_request;
mod shared;

pub use event::{IEventRepo, InMemoryEventRepo, PostgresEventRepo};
pub use event_join_request::{
    IEventJoinRequestRepo, InMemoryEventJoinRequestRepo, PostgresEventJoinRequestRepo,
};
pub use shared::repo::DeleteResult;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub event_join_requests: Arc<dyn IEventJoinRequestRepo>,
}

impl Repos {
    pub fn create_postgres(pool: PgPool) -> Self {
        Self {
            events: Arc::new(PostgresEventRepo::new(pool.clone())),
            event_join_requests: Arc::new(PostgresEventJoinRequestRepo::new(pool)),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryEventRepo::new()),
            event_join_requests: Arc::new(InMemoryEventJoinRequestRepo::new()),
        }
    }
}
