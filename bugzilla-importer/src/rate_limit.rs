//! Request pacing for the GitHub v2 API.
//!
//! The v2 API enforces a per-minute request quota and offers no headers to
//! query it, so the importer can instead keep a fixed minimum spacing between
//! consecutive calls.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Enforces a minimum interval between consecutive requests.
#[derive(Debug)]
pub struct RequestThrottle {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestThrottle {
    /// Creates a throttle. A zero interval disables throttling.
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Returns the configured minimum interval.
    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until the next request may be sent.
    ///
    /// # Returns
    ///
    /// How long this call slept.
    pub async fn wait(&self) -> Duration {
        if self.min_interval.is_zero() {
            return Duration::ZERO;
        }

        let wait = {
            let mut next_slot = self.next_slot.lock().unwrap_or_else(PoisonError::into_inner);
            let now = Instant::now();
            let start = match *next_slot {
                Some(slot) if slot > now => slot,
                _ => now,
            };
            *next_slot = Some(start + self.min_interval);
            start - now
        };

        if !wait.is_zero() {
            debug!(wait_ms = wait.as_millis() as u64, "Throttling request");
            sleep(wait).await;
        }
        wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_throttle_never_waits() {
        let throttle = RequestThrottle::new(Duration::ZERO);

        assert_eq!(throttle.wait().await, Duration::ZERO);
        assert_eq!(throttle.wait().await, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn spaces_consecutive_requests() {
        let throttle = RequestThrottle::new(Duration::from_millis(500));
        let start = Instant::now();

        assert_eq!(throttle.wait().await, Duration::ZERO);
        assert_eq!(throttle.wait().await, Duration::from_millis(500));
        assert_eq!(throttle.wait().await, Duration::from_millis(500));
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_wait_after_idle_period() {
        let throttle = RequestThrottle::new(Duration::from_millis(500));

        throttle.wait().await;
        tokio::time::advance(Duration::from_secs(2)).await;

        assert_eq!(throttle.wait().await, Duration::ZERO);
    }
}
