// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request pacing for outbound network calls
//!
//! One shared instance is handed to the content fetcher and every search
//! provider so that all outbound requests honor a single minimum
//! inter-request interval, regardless of which component issues them.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovRateLimiter};
use std::time::Duration;

/// Minimum-interval rate limiter for outbound requests
///
/// Built on a one-cell quota: a permit replenishes once per `min_interval`,
/// so `wait()` resolves immediately for the first caller and then spaces
/// every subsequent call by at least the interval. Safe for concurrent use.
pub struct RequestRateLimiter {
    limiter: Option<GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    min_interval: Duration,
}

impl RequestRateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    /// * `min_interval` - Minimum time between consecutive permits. A zero
    ///   interval disables pacing entirely.
    pub fn new(min_interval: Duration) -> Self {
        let limiter = Quota::with_period(min_interval).map(GovRateLimiter::direct);
        Self {
            limiter,
            min_interval,
        }
    }

    /// Wait until the next request is allowed
    ///
    /// Blocks the calling task until at least `min_interval` has elapsed
    /// since the previous permit. Cannot fail, only delay.
    pub async fn wait(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    /// Get the configured minimum interval
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
