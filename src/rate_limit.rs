use std::{num::NonZeroU32, time::Duration};

use governor::{DefaultDirectRateLimiter, Quota};

/// Lets at most `permits` requests start within one `period`.
///
/// One limiter is meant to be shared by everything that talks to the site.
#[derive(Debug)]
pub struct RateLimiter {
    limiter: DefaultDirectRateLimiter,
    permits: NonZeroU32,
}

impl RateLimiter {
    pub fn new(permits: u32, period: Duration) -> Self {
        let permits = NonZeroU32::new(permits).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period / permits.get())
            .map(|quota| quota.allow_burst(permits))
            .unwrap_or_else(|| Quota::per_second(permits));

        Self {
            limiter: governor::RateLimiter::direct(quota),
            permits,
        }
    }

    pub fn permits(&self) -> u32 {
        self.permits.get()
    }

    /// Waits until a request may be sent.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(2, Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[tokio::test]
    async fn limits_per_period() {
        let limiter = RateLimiter::new(2, Duration::from_millis(200));
        let start = Instant::now();

        limiter.acquire().await;
        limiter.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(50));

        // Burst used up, the next one waits for a replenished permit
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(80));
    }

    #[test]
    fn at_least_one_permit() {
        assert_eq!(RateLimiter::new(0, Duration::from_secs(1)).permits(), 1);
    }
}
