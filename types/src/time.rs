//! Timestamp type used throughout the engine.
//!
//! Timestamps are Unix epoch seconds (UTC). The engine never reads a clock
//! itself — the current time is an input to every time-dependent operation,
//! supplied by the embedding platform.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs();
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since this timestamp (relative to `now`).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whether this timestamp + duration has passed relative to `now`.
    pub fn has_expired(&self, duration_secs: u64, now: Timestamp) -> bool {
        now.0 >= self.0.saturating_add(duration_secs)
    }

    /// Seconds still to wait until this timestamp + duration has passed.
    /// Zero once the duration has fully elapsed.
    pub fn remaining(&self, duration_secs: u64, now: Timestamp) -> u64 {
        self.0.saturating_add(duration_secs).saturating_sub(now.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_inclusive_at_the_boundary() {
        let t = Timestamp::new(1_000);
        assert!(!t.has_expired(100, Timestamp::new(1_099)));
        assert!(t.has_expired(100, Timestamp::new(1_100)));
        assert!(t.has_expired(100, Timestamp::new(1_101)));
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let t = Timestamp::new(1_000);
        assert_eq!(t.remaining(100, Timestamp::new(1_000)), 100);
        assert_eq!(t.remaining(100, Timestamp::new(1_060)), 40);
        assert_eq!(t.remaining(100, Timestamp::new(1_100)), 0);
        assert_eq!(t.remaining(100, Timestamp::new(2_000)), 0);
    }
}
