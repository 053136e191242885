//! Time source used to derive the online status of a user.
//!
//! Presence is never stored: it is computed from the last activity timestamp
//! and the current time. The current time is injected through [`Clock`] so the
//! status can be computed against a fixed instant in tests.

use chrono::{DateTime, Utc};

/// Provides the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// [`Clock`] backed by the system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// [`Clock`] frozen at a given instant.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
impl FixedClock {
    /// Creates a clock frozen at a `YYYY-MM-DD HH:MM:SS` UTC timestamp.
    pub fn at(timestamp: &str) -> Self {
        let naive = chrono::NaiveDateTime::parse_from_str(
            timestamp,
            crate::ra::LAST_PLAYED_FORMAT,
        )
        .unwrap();
        FixedClock(naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::at("2024-08-31 17:01:00");
        assert_eq!(clock.now().to_rfc3339(), "2024-08-31T17:01:00+00:00");
    }
}
