//! Client-side request throttling
//!
//! Token bucket in front of every HTTP attempt, retries included, so a burst
//! of retries cannot push the tap over the API's request quota.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Configuration for rate limiting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Sustained requests per second
    pub requests_per_second: u32,
    /// Requests allowed back to back before throttling starts
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::per_second(5)
    }
}

impl RateLimiterConfig {
    /// Create a new rate limiter config
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }

    /// `n` requests per second with a burst of the same size
    pub fn per_second(n: u32) -> Self {
        Self::new(n, n)
    }

    fn quota(&self) -> Quota {
        // Zero would be an invalid quota; treat it as the slowest rate
        let rate = NonZeroU32::new(self.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN);
        Quota::per_second(rate).allow_burst(burst)
    }
}

/// Shared token bucket; clones draw from the same bucket
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<Governor<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            limiter: Arc::new(Governor::direct(config.quota())),
        }
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_rate_limiter_config() {
        assert_eq!(RateLimiterConfig::default(), RateLimiterConfig::new(5, 5));
        assert_eq!(RateLimiterConfig::per_second(2).burst_size, 2);
    }

    #[test]
    fn test_zero_config_falls_back_to_one() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(0, 0));
        assert!(limiter.limiter.check().is_ok());
        assert!(limiter.limiter.check().is_err());
    }

    #[test]
    fn test_clones_share_the_bucket() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(1, 2));
        let clone = limiter.clone();

        assert!(limiter.limiter.check().is_ok());
        assert!(clone.limiter.check().is_ok());
        assert!(limiter.limiter.check().is_err());
    }

    #[tokio::test]
    async fn test_wait_within_burst_does_not_block() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(1, 3));

        let waited = tokio::time::timeout(Duration::from_millis(100), async {
            for _ in 0..3 {
                limiter.wait().await;
            }
        })
        .await;
        assert!(waited.is_ok());
    }
}
