use chrono::Utc;
use tokio::time::Instant;

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Wall clock that starts at a given timestamp and then follows the tokio clock.
///
/// When the tokio clock is paused, advancing it moves this clock and fires
/// pending timers together.
pub struct InstantSys {
    start_ts: i64,
    start: Instant,
}

impl InstantSys {
    pub fn new(start_ts: i64) -> Self {
        Self {
            start_ts,
            start: Instant::now(),
        }
    }
}

impl ISys for InstantSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.start_ts + self.start.elapsed().as_millis() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn instant_sys_follows_tokio_clock() {
        let sys = InstantSys::new(1_000);
        assert_eq!(sys.get_timestamp_millis(), 1_000);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(sys.get_timestamp_millis(), 3_000);
    }
}
