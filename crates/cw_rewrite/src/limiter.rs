use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Token bucket in front of the completion endpoint: one permit per
/// configured period, no burst. A zero period disables limiting, which is
/// what tests run with.
pub struct RewriteLimiter {
    inner: Option<DirectLimiter>,
}

impl RewriteLimiter {
    pub fn new(period: Duration) -> Self {
        Self {
            inner: Quota::with_period(period).map(RateLimiter::direct),
        }
    }

    pub fn unlimited() -> Self {
        Self { inner: None }
    }

    pub async fn acquire(&self) {
        if let Some(limiter) = &self.inner {
            limiter.until_ready().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn spaces_out_acquisitions() {
        let limiter = RewriteLimiter::new(Duration::from_millis(30));
        let start = Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        limiter.acquire().await;
        // First permit is immediate, the next two each wait a period.
        assert!(start.elapsed() >= Duration::from_millis(55));
    }

    #[tokio::test]
    async fn zero_period_never_waits() {
        let limiter = RewriteLimiter::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..100 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
