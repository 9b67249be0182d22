use connectu_utils::create_random_secret;
use std::{fmt::Display, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret key that has to be sent in the `x-api-key` header
    /// to use the admin routes
    pub admin_api_key: String,
    /// Port for the application to run on
    pub port: usize,
    /// How many times a timer tries to persist a status change before
    /// giving up. The event is then left for the next rescan.
    pub status_save_attempts: u32,
    /// Delay in millis before the first retry of a failed status save.
    /// Doubled for every further attempt.
    pub status_save_backoff_millis: u64,
    /// Whether transitions that became due while the process was down
    /// should be applied right away instead of being skipped.
    pub catch_up_overdue_events: bool,
    /// How long a friend invite code can be redeemed, in millis
    pub friend_invite_ttl_millis: i64,
}

fn parse_env_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match std::env::var(name) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    name, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

fn invite_ttl_millis(ttl_secs: i64) -> i64 {
    ttl_secs.max(1).saturating_mul(1000)
}

impl Config {
    pub fn new() -> Self {
        let admin_api_key = match std::env::var("ADMIN_API_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find ADMIN_API_KEY environment variable. Going to create one.");
                let key = create_random_secret(32);
                info!("Admin api key was generated and set to: {}", key);
                key
            }
        };
        let port = parse_env_or("PORT", 5000);
        let status_save_attempts: u32 = parse_env_or("EVENT_STATUS_SAVE_ATTEMPTS", 3);
        let status_save_backoff_millis = parse_env_or("EVENT_STATUS_SAVE_BACKOFF_MILLIS", 500);
        let catch_up_overdue_events = parse_env_or("CATCH_UP_OVERDUE_EVENTS", false);
        let friend_invite_ttl_secs: i64 = parse_env_or("FRIEND_INVITE_TTL_SECS", 60 * 15);

        Self {
            admin_api_key,
            port,
            status_save_attempts: status_save_attempts.max(1),
            status_save_backoff_millis,
            catch_up_overdue_events,
            friend_invite_ttl_millis: invite_ttl_millis(friend_invite_ttl_secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
