//! Rate Limiting Infrastructure
//!
//! Common rate limiting abstractions. Storage backends implement
//! [`RateLimitStore`]; the contract is an atomic increment so that
//! concurrent requests for the same key cannot both slip under the
//! limit via a read-then-write race.

use std::time::Duration;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 3,
            window: Duration::from_secs(30),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    pub fn window_secs(&self) -> u64 {
        self.window.as_secs()
    }
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Atomically increment the counter at `key`, setting the window
    /// TTL on first increment. Returns `true` iff the incremented
    /// count exceeds `config.max_requests`.
    async fn is_rate_limited(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}
