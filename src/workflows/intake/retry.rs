use rand::Rng;
use std::time::Duration;

/// Backoff schedule for upstream requests. Delays double per attempt up to a
/// cap, with ±25% jitter so repeated runs do not hammer the service in step.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay_ms: 500,
            max_delay_ms: 8_000,
        }
    }
}

impl RetryPolicy {
    pub(crate) fn delay_for(&self, attempt: u32) -> Duration {
        let exponential = self
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(16));
        let capped = exponential.min(self.max_delay_ms);

        let jitter_span = capped / 4;
        let jitter = rand::thread_rng().gen_range(0..=jitter_span.saturating_mul(2)) as i64
            - jitter_span as i64;

        Duration::from_millis(((capped as i64) + jitter).max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double_until_the_cap() {
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay_ms: 500,
            max_delay_ms: 8_000,
        };

        for (attempt, nominal_ms) in [(1u32, 1_000u64), (2, 2_000), (3, 4_000), (4, 8_000), (10, 8_000)] {
            let delay = policy.delay_for(attempt).as_millis() as u64;
            let span = nominal_ms / 4;
            assert!(
                delay >= nominal_ms - span && delay <= nominal_ms + span,
                "attempt {attempt}: {delay}ms outside jitter window around {nominal_ms}ms"
            );
        }
    }

    #[test]
    fn huge_attempt_numbers_do_not_overflow() {
        let policy = RetryPolicy::default();
        assert!(policy.delay_for(u32::MAX).as_millis() as u64 <= policy.max_delay_ms + policy.max_delay_ms / 4);
    }
}
