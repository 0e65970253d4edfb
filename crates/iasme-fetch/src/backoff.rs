//! Retry backoff schedule.

use rand::Rng;
use std::time::Duration;

/// Upper bound on the exponential part of the delay.
pub const MAX_BACKOFF_MS: u64 = 5_000;

/// Random jitter is drawn from `[0, MAX_JITTER_MS)`.
pub const MAX_JITTER_MS: u64 = 250;

/// Delay before the retry that follows failed attempt number `attempt` (1-based).
///
/// `min(base_ms * 2^(attempt - 1), 5000ms)` plus jitter in `[0, 250ms)`.
#[must_use]
pub fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    let jitter = rand::thread_rng().gen_range(0..MAX_JITTER_MS);
    exponential_part(base_ms, attempt) + Duration::from_millis(jitter)
}

fn exponential_part(base_ms: u64, attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(32);
    let scaled = base_ms.saturating_mul(1u64 << exponent);
    Duration::from_millis(scaled.min(MAX_BACKOFF_MS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_growth() {
        assert_eq!(exponential_part(500, 1), Duration::from_millis(500));
        assert_eq!(exponential_part(500, 2), Duration::from_millis(1_000));
        assert_eq!(exponential_part(500, 3), Duration::from_millis(2_000));
        assert_eq!(exponential_part(500, 4), Duration::from_millis(4_000));
    }

    #[test]
    fn test_backoff_is_capped() {
        assert_eq!(exponential_part(500, 5), Duration::from_millis(MAX_BACKOFF_MS));
        assert_eq!(exponential_part(500, 60), Duration::from_millis(MAX_BACKOFF_MS));
        assert_eq!(exponential_part(u64::MAX, 2), Duration::from_millis(MAX_BACKOFF_MS));
    }

    #[test]
    fn test_jitter_bounds() {
        for attempt in 1..=6 {
            let delay = backoff_delay(100, attempt);
            let floor = exponential_part(100, attempt);
            assert!(delay >= floor);
            assert!(delay < floor + Duration::from_millis(MAX_JITTER_MS));
        }
    }
}
