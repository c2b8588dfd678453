//! Request Log Module
//!
//! Per-key record of admitted request instants, trimmed to a trailing window.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

// == Request Log ==
/// Admitted request instants for one scope key, oldest first.
#[derive(Debug, Default)]
pub struct RequestLog {
    timestamps: VecDeque<Instant>,
}

impl RequestLog {
    // == Constructor ==
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    // == Prune ==
    /// Drops every instant that is at least `window` old, i.e. every
    /// `t <= now - window`.
    pub fn prune(&mut self, now: Instant, window: Duration) {
        while let Some(&oldest) = self.timestamps.front() {
            if now.saturating_duration_since(oldest) >= window {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    // == Record ==
    /// Appends an admitted request.
    pub fn record(&mut self, now: Instant) {
        self.timestamps.push_back(now);
    }

    // == Retry After ==
    /// Whole seconds until the oldest instant leaves the window, plus one.
    ///
    /// Computed as `floor(window - (now - oldest)) + 1`, so the result is
    /// never below 1. An empty log has nothing to wait for and yields the
    /// full window. Windows too long to add to an instant saturate at
    /// `u64::MAX`.
    pub fn retry_after_secs(&self, now: Instant, window: Duration) -> u64 {
        let waited = match self.timestamps.front() {
            Some(&oldest) => now.saturating_duration_since(oldest),
            None => Duration::ZERO,
        };
        window.saturating_sub(waited).as_secs().saturating_add(1)
    }

    // == Len ==
    /// Number of admissions currently held.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    // == Is Empty ==
    /// Returns true when no admission is held.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(10);

    #[test]
    fn test_prune_keeps_recent() {
        let start = Instant::now();
        let mut log = RequestLog::new();
        log.record(start);
        log.record(start + Duration::from_secs(5));

        log.prune(start + Duration::from_secs(9), WINDOW);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_prune_drops_at_window_boundary() {
        let start = Instant::now();
        let mut log = RequestLog::new();
        log.record(start);
        log.record(start + Duration::from_secs(5));

        // t == now - window is outside the window
        log.prune(start + WINDOW, WINDOW);
        assert_eq!(log.len(), 1);
        // The survivor is the t=5 admission, which frees at t=15
        assert_eq!(log.retry_after_secs(start + WINDOW, WINDOW), 6);

        log.prune(start + Duration::from_secs(30), WINDOW);
        assert!(log.is_empty());
    }

    #[test]
    fn test_retry_after_rounds_up() {
        let start = Instant::now();
        let mut log = RequestLog::new();
        log.record(start);

        // 10 - 2.5 = 7.5s remaining -> floor + 1 = 8
        let now = start + Duration::from_millis(2500);
        assert_eq!(log.retry_after_secs(now, WINDOW), 8);

        // Exactly 7s remaining still advises 8
        let now = start + Duration::from_secs(3);
        assert_eq!(log.retry_after_secs(now, WINDOW), 8);
    }

    #[test]
    fn test_retry_after_minimum_is_one() {
        let start = Instant::now();
        let mut log = RequestLog::new();
        log.record(start);

        let now = start + Duration::from_millis(9_999);
        assert_eq!(log.retry_after_secs(now, WINDOW), 1);
    }

    #[test]
    fn test_retry_after_empty_log() {
        let log = RequestLog::new();
        assert_eq!(log.retry_after_secs(Instant::now(), WINDOW), 11);
    }

    #[test]
    fn test_retry_after_with_unrepresentable_window() {
        let start = Instant::now();
        let mut log = RequestLog::new();
        log.record(start);

        let huge = Duration::from_secs(u64::MAX);
        let now = start + Duration::from_secs(1);
        assert_eq!(log.retry_after_secs(now, huge), u64::MAX);
        assert_eq!(RequestLog::new().retry_after_secs(now, huge), u64::MAX);

        log.prune(now, huge);
        assert_eq!(log.len(), 1);
    }
}
