use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Keeps a minimum spacing between consecutive outgoing requests
pub struct RateLimiter {
    delay: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_request: None,
        }
    }

    pub async fn wait(&mut self) {
        let remaining = self.remaining_delay(Instant::now());
        if !remaining.is_zero() {
            sleep(remaining).await;
        }
        self.last_request = Some(Instant::now());
    }

    fn remaining_delay(&self, now: Instant) -> Duration {
        match self.last_request {
            Some(last) => self.delay.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}
