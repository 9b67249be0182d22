use crate::dtos::FriendInviteDTO;
use connectu_domain::{FriendInvite, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendInviteResponse {
    pub invite: FriendInviteDTO,
}

impl FriendInviteResponse {
    pub fn new(invite: FriendInvite) -> Self {
        Self {
            invite: FriendInviteDTO::new(invite),
        }
    }
}

pub mod create_friend_invite {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: ID,
    }

    pub type APIResponse = FriendInviteResponse;
}

pub mod get_friend_invite {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub code: String,
    }

    pub type APIResponse = FriendInviteResponse;
}

pub mod redeem_friend_invite {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub code: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub inviter_id: ID,
        pub invitee_id: ID,
    }
}
