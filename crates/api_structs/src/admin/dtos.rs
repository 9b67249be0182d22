use connectu_domain::{Event, EventStatus, StatusTransition, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventDTO {
    pub id: ID,
    pub scheduled_ts: i64,
    pub status: EventStatus,
}

impl EventDTO {
    pub fn new(event: Event) -> Self {
        Self {
            id: event.id,
            scheduled_ts: event.scheduled_ts,
            status: event.status,
        }
    }
}

/// A status transition that is waiting for its timer to fire
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTimerDTO {
    pub event_id: ID,
    pub transition: StatusTransition,
    pub fire_at: i64,
}
