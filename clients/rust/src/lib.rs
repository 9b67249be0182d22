mod admin;
mod base;
mod friend;
mod status;

use admin::AdminClient;
pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
pub use connectu_api_structs::dtos::*;
pub use connectu_domain::{EventStatus, StatusTransition, ID};
use friend::FriendClient;
use status::StatusClient;
use std::sync::Arc;

/// ConnectU Server SDK
///
/// The SDK contains methods for interacting with the ConnectU server API.
#[derive(Clone)]
pub struct ConnectuSDK {
    pub admin: AdminClient,
    pub friend: FriendClient,
    pub status: StatusClient,
}

impl ConnectuSDK {
    fn create(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let admin = AdminClient::new(base.clone());
        let friend = FriendClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            admin,
            friend,
            status,
        }
    }

    pub fn new(address: String) -> Self {
        Self::create(BaseClient::new(address))
    }

    pub fn new_admin<T: Into<String>>(address: String, api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_key(api_key.into());
        Self::create(base)
    }
}
