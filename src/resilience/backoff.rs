//! Exponential backoff with jitter.

use std::time::Duration;

/// Delay before the next attempt: `base * 2^(attempt-1)` capped at `max_ms`,
/// plus up to 10% jitter.
pub fn backoff_delay(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let capped = base_ms
        .saturating_mul(2u64.saturating_pow(attempt - 1))
        .min(max_ms);

    let jitter_range = capped / 10;
    let jitter = if jitter_range > 0 {
        fastrand::u64(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_doubles_per_attempt() {
        let d1 = backoff_delay(1, 100, 2000).as_millis();
        let d2 = backoff_delay(2, 100, 2000).as_millis();
        let d3 = backoff_delay(3, 100, 2000).as_millis();

        assert!((100..110).contains(&d1));
        assert!((200..220).contains(&d2));
        assert!((400..440).contains(&d3));
    }

    #[test]
    fn test_delay_is_capped() {
        let d = backoff_delay(20, 100, 1500).as_millis();
        assert!((1500..1650).contains(&d));
    }

    #[test]
    fn test_attempt_zero_is_immediate() {
        assert_eq!(backoff_delay(0, 100, 2000), Duration::ZERO);
    }
}
