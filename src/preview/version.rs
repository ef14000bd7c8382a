// SPDX-License-Identifier: MPL-2.0
//! Content version tokens.

use std::fmt;

/// Token embedded in the image source so a re-rendered document never hits
/// a cached copy of the previous load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentVersion(i64);

impl ContentVersion {
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out strictly increasing tokens based on wall-clock milliseconds.
#[derive(Debug, Default)]
pub struct VersionClock {
    last: Option<i64>,
}

impl VersionClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> ContentVersion {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    /// Two renders within the same millisecond (or after a clock step back)
    /// still get distinct tokens.
    fn next_at(&mut self, now_millis: i64) -> ContentVersion {
        let value = match self.last {
            Some(last) if now_millis <= last => last + 1,
            _ => now_millis,
        };
        self.last = Some(value);
        ContentVersion(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_tokens_are_distinct() {
        let mut clock = VersionClock::new();
        let first = clock.next();
        let second = clock.next();
        assert!(second > first);
    }

    #[test]
    fn same_millisecond_is_bumped() {
        let mut clock = VersionClock::new();
        assert_eq!(clock.next_at(1_000).value(), 1_000);
        assert_eq!(clock.next_at(1_000).value(), 1_001);
        assert_eq!(clock.next_at(1_005).value(), 1_005);
    }

    #[test]
    fn clock_stepping_back_stays_monotonic() {
        let mut clock = VersionClock::new();
        clock.next_at(2_000);
        assert_eq!(clock.next_at(1_500).value(), 2_001);
    }
}
