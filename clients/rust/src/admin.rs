use crate::{APIResponse, BaseClient, ID};
use connectu_api_structs::*;
use reqwest::StatusCode;
use std::{collections::HashMap, sync::Arc};

/// Client for the routes that require the admin api key
#[derive(Clone)]
pub struct AdminClient {
    base: Arc<BaseClient>,
}

impl AdminClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn reschedule_events(&self) -> APIResponse<reschedule_events::APIResponse> {
        self.base
            .post(
                HashMap::<String, String>::new(),
                "admin/events/reschedule".into(),
                StatusCode::OK,
            )
            .await
    }

    pub async fn get_scheduled_timers(&self) -> APIResponse<get_scheduled_timers::APIResponse> {
        self.base
            .get("admin/events/timers".into(), StatusCode::OK)
            .await
    }

    pub async fn cancel_event(&self, event_id: ID) -> APIResponse<cancel_event::APIResponse> {
        self.base
            .post(
                HashMap::<String, String>::new(),
                format!("admin/events/{}/cancel", event_id),
                StatusCode::OK,
            )
            .await
    }
}
