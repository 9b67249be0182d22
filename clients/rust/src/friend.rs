use crate::{APIResponse, BaseClient, ID};
use connectu_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct FriendClient {
    base: Arc<BaseClient>,
}

impl FriendClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create_invite(
        &self,
        user_id: ID,
    ) -> APIResponse<create_friend_invite::APIResponse> {
        let body = create_friend_invite::RequestBody { user_id };
        self.base
            .post(body, "friends/invites".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get_invite(&self, code: &str) -> APIResponse<get_friend_invite::APIResponse> {
        self.base
            .get(format!("friends/invites/{}", code), StatusCode::OK)
            .await
    }

    pub async fn redeem_invite(
        &self,
        code: &str,
        user_id: ID,
    ) -> APIResponse<redeem_friend_invite::APIResponse> {
        let body = redeem_friend_invite::RequestBody { user_id };
        self.base
            .post(
                body,
                format!("friends/invites/{}/redeem", code),
                StatusCode::OK,
            )
            .await
    }
}
