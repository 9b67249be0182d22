use crate::shared::timers::TimerRegistry;
use connectu_domain::{FriendInvite, ID};
use connectu_infra::ISys;
use connectu_utils::create_random_secret;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tracing::debug;

const INVITE_CODE_LEN: usize = 10;

#[derive(Debug, PartialEq)]
pub enum RedeemError {
    NotFound,
    SelfInvite,
}

/// Friend invite codes that are only held in memory and expire on their own.
///
/// A `User` has at most one redeemable code, creating a new one drops the
/// previous code.
#[derive(Clone)]
pub struct FriendInviteCache {
    inner: Arc<CacheInner>,
}

struct CacheInner {
    sys: Arc<dyn ISys>,
    ttl_millis: i64,
    invites: TimerRegistry<String, FriendInvite>,
    codes_by_user: Mutex<HashMap<ID, String>>,
}

impl FriendInviteCache {
    pub fn new(sys: Arc<dyn ISys>, ttl_millis: i64) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                sys,
                ttl_millis: ttl_millis.max(1),
                invites: TimerRegistry::new(),
                codes_by_user: Mutex::new(HashMap::new()),
            }),
        }
    }

    fn codes_by_user(&self) -> MutexGuard<'_, HashMap<ID, String>> {
        self.inner
            .codes_by_user
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn create(&self, user_id: ID) -> FriendInvite {
        let invite = FriendInvite {
            code: create_random_secret(INVITE_CODE_LEN),
            user_id: user_id.clone(),
            expires_ts: self
                .inner
                .sys
                .get_timestamp_millis()
                .saturating_add(self.inner.ttl_millis),
        };

        let mut codes_by_user = self.codes_by_user();
        if let Some(previous) = codes_by_user.insert(user_id, invite.code.clone()) {
            self.inner.invites.cancel(&previous);
        }

        let cache = self.clone();
        let code = invite.code.clone();
        self.inner.invites.arm(
            invite.code.clone(),
            invite.clone(),
            invite.expires_ts,
            Duration::from_millis(self.inner.ttl_millis as u64),
            move |generation| async move {
                cache.expire(&code, generation);
            },
        );

        invite
    }

    pub fn get(&self, code: &str) -> Option<FriendInvite> {
        let invite = self.inner.invites.get(code)?.tag;
        if invite.is_expired(self.inner.sys.get_timestamp_millis()) {
            return None;
        }
        Some(invite)
    }

    /// Consumes the invite so that it can not be redeemed again.
    /// Returns the invite of the `User` that created the code.
    pub fn redeem(&self, code: &str, invitee_id: &ID) -> Result<FriendInvite, RedeemError> {
        let invite = self.get(code).ok_or(RedeemError::NotFound)?;
        if invite.user_id == *invitee_id {
            return Err(RedeemError::SelfInvite);
        }

        let mut codes_by_user = self.codes_by_user();
        let invite = self
            .inner
            .invites
            .cancel(code)
            .ok_or(RedeemError::NotFound)?;
        if codes_by_user.get(&invite.user_id).map(|c| c.as_str()) == Some(code) {
            codes_by_user.remove(&invite.user_id);
        }
        Ok(invite)
    }

    fn expire(&self, code: &str, generation: u64) {
        let mut codes_by_user = self.codes_by_user();
        if let Some(invite) = self.inner.invites.release(code, generation) {
            if codes_by_user.get(&invite.user_id).map(|c| c.as_str()) == Some(code) {
                codes_by_user.remove(&invite.user_id);
            }
            debug!(user_id = %invite.user_id, "Friend invite expired");
        }
    }

    pub fn len(&self) -> usize {
        self.inner.invites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.invites.is_empty()
    }
}
