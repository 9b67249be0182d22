use crate::{APIResponse, BaseClient};
use connectu_api_structs::get_service_health::APIResponse as HealthResponse;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct StatusClient {
    base: Arc<BaseClient>,
}

impl StatusClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn check_health(&self) -> APIResponse<HealthResponse> {
        self.base.get("".into(), StatusCode::OK).await
    }
}
