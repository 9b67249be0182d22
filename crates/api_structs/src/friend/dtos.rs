use connectu_domain::{FriendInvite, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FriendInviteDTO {
    pub code: String,
    pub user_id: ID,
    pub expires_ts: i64,
}

impl FriendInviteDTO {
    pub fn new(invite: FriendInvite) -> Self {
        Self {
            code: invite.code,
            user_id: invite.user_id,
            expires_ts: invite.expires_ts,
        }
    }
}
