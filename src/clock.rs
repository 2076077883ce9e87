// Time source for new records

use chrono::{Local, NaiveDateTime, SubsecRound};

use crate::record::parse_timestamp;

/// Supplies the timestamp stamped on newly added tasks
///
/// Swapped for `FixedClock` in tests.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time, whole seconds
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local().trunc_subsecs(0)
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Build from a `YYYY-MM-DD HH:MM:SS` string
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        parse_timestamp(s).map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_system_clock_whole_seconds() {
        let now = SystemClock.now();
        assert_eq!(now.nanosecond(), 0);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::parse("2024-01-01 00:00:00").unwrap();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(crate::record::format_timestamp(&clock.now()), "2024-01-01 00:00:00");

        assert!(FixedClock::parse("yesterday").is_err());
    }
}
