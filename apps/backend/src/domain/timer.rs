//! Server-side phase timer.
//!
//! Clients only ever see a deadline and a remaining duration computed here;
//! their own clocks never decide anything.

use time::{Duration, OffsetDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimer {
    pub starts_at: OffsetDateTime,
    pub duration_secs: i32,
}

impl PhaseTimer {
    pub fn new(starts_at: OffsetDateTime, duration_secs: i32) -> Self {
        Self {
            starts_at,
            duration_secs,
        }
    }

    pub fn deadline(&self) -> OffsetDateTime {
        self.starts_at + Duration::seconds(i64::from(self.duration_secs))
    }

    /// Time left at `now`, never negative.
    pub fn remaining(&self, now: OffsetDateTime) -> Duration {
        let left = self.deadline() - now;
        if left.is_negative() {
            Duration::ZERO
        } else {
            left
        }
    }

    pub fn remaining_ms(&self, now: OffsetDateTime) -> i64 {
        self.remaining(now).whole_milliseconds() as i64
    }

    /// True once `now` is within `skew_ms` of the deadline or past it.
    pub fn expired(&self, now: OffsetDateTime, skew_ms: i64) -> bool {
        now >= self.deadline() - Duration::milliseconds(skew_ms)
    }
}
