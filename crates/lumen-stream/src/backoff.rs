use std::time::Duration;

pub const DEFAULT_RECONNECT_INITIAL: Duration = Duration::from_secs(3);
pub const DEFAULT_RECONNECT_MAX: Duration = Duration::from_secs(30);

/// Exponential reconnect delay: `base`, `2 * base`, `4 * base`, ... capped at `max`.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    max: Duration,
    attempt: u32,
}

impl Backoff {
    pub fn new(base: Duration, max: Duration) -> Self {
        Self {
            base,
            max: max.max(base),
            attempt: 0,
        }
    }

    /// Delay before the next attempt; advances the sequence.
    pub fn next_delay(&mut self) -> Duration {
        let factor = 1u32.checked_shl(self.attempt).unwrap_or(u32::MAX);
        let delay = self.base.saturating_mul(factor).min(self.max);
        self.attempt = self.attempt.saturating_add(1);
        delay
    }

    /// Restarts the sequence after a successful connection.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Replaces the initial delay (server `retry:` field).
    pub fn set_base(&mut self, base: Duration) {
        self.base = base;
        self.max = self.max.max(base);
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(DEFAULT_RECONNECT_INITIAL, DEFAULT_RECONNECT_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_then_caps() {
        let mut b = Backoff::default();
        let secs: Vec<u64> = (0..6).map(|_| b.next_delay().as_secs()).collect();
        assert_eq!(secs, [3, 6, 12, 24, 30, 30]);
    }

    #[test]
    fn reset_starts_over() {
        let mut b = Backoff::default();
        b.next_delay();
        b.next_delay();
        b.reset();
        assert_eq!(b.next_delay(), Duration::from_secs(3));
    }

    #[test]
    fn server_retry_replaces_base() {
        let mut b = Backoff::default();
        b.set_base(Duration::from_millis(500));
        assert_eq!(b.next_delay(), Duration::from_millis(500));
        assert_eq!(b.next_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn many_attempts_do_not_overflow() {
        let mut b = Backoff::default();
        for _ in 0..100 {
            assert!(b.next_delay() <= DEFAULT_RECONNECT_MAX);
        }
    }

    #[test]
    fn max_never_below_base() {
        let mut b = Backoff::new(Duration::from_secs(10), Duration::from_secs(1));
        assert_eq!(b.next_delay(), Duration::from_secs(10));
    }
}
