use crate::shared::entity::ID;

/// A short lived code a `User` hands out so that others can befriend them
#[derive(Debug, Clone, PartialEq)]
pub struct FriendInvite {
    pub code: String,
    /// The `User` that created the invite
    pub user_id: ID,
    pub expires_ts: i64,
}

impl FriendInvite {
    pub fn is_expired(&self, now_ts: i64) -> bool {
        now_ts >= self.expires_ts
    }
}
