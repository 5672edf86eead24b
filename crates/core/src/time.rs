use chrono::{DateTime, Duration, Local, LocalResult, TimeZone, Utc};

/// A simple clock abstraction for deterministic time in services and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Returns the current time in the local timezone.
    #[must_use]
    pub fn now_local(&self) -> DateTime<Local> {
        self.now().with_timezone(&Local)
    }
}

/// The first instant of the local day after `after`.
///
/// Streak resets are anchored to local midnight. Zones whose DST transition
/// lands on midnight either repeat or skip it; the earliest valid instant of
/// the next day is used in both cases.
#[must_use]
pub fn next_local_midnight(after: DateTime<Local>) -> DateTime<Local> {
    let date = after
        .date_naive()
        .succ_opt()
        .unwrap_or_else(|| after.date_naive());
    let naive = date.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => t,
        LocalResult::None => Local
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| after + Duration::days(1)),
    }
}

/// Wall-clock wait until the next local day boundary.
#[must_use]
pub fn until_next_local_midnight(now: DateTime<Local>) -> std::time::Duration {
    (next_local_midnight(now) - now).to_std().unwrap_or_default()
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_midnight_is_strictly_after_and_within_a_day() {
        let now = fixed_now().with_timezone(&Local);
        let midnight = next_local_midnight(now);
        assert!(midnight > now);
        assert!(midnight - now <= Duration::days(1));
    }

    #[test]
    fn until_next_midnight_is_positive() {
        let now = fixed_now().with_timezone(&Local);
        let wait = until_next_local_midnight(now);
        assert!(wait > std::time::Duration::ZERO);
        assert!(wait <= std::time::Duration::from_secs(24 * 60 * 60));
    }

    #[test]
    fn fixed_clock_is_stable() {
        let clock = fixed_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now(), fixed_now());
    }
}
