use crate::dtos::{EventDTO, ScheduledTimerDTO};
use connectu_domain::{Event, ID};
use serde::{Deserialize, Serialize};

pub mod reschedule_events {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Events that were upcoming or live when the rescan ran
        pub scanned: usize,
        /// Timers that were armed by the rescan
        pub armed: usize,
    }
}

pub mod get_scheduled_timers {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub timers: Vec<ScheduledTimerDTO>,
    }
}

pub mod cancel_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub event: EventDTO,
    }

    impl APIResponse {
        pub fn new(event: Event) -> Self {
            Self {
                event: EventDTO::new(event),
            }
        }
    }
}
