//! Injected time source
//!
//! Key expiry and rate-limit windows both depend on "now"; services take a
//! `Clock` handle instead of calling `Utc::now()` directly so tests can pin
//! or advance time.

use chrono::{DateTime, NaiveDate, Utc};

/// Source of the current UTC time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current UTC day, for day-granularity expiry checks
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Current time as epoch seconds, for usage-window timestamps
    fn epoch_seconds(&self) -> u64 {
        self.now().timestamp().max(0) as u64
    }
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually controlled clock for tests
#[derive(Debug)]
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: std::sync::Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }

    pub fn advance(&self, duration: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap());
        let before = clock.epoch_seconds();

        clock.advance(chrono::Duration::seconds(90));

        assert_eq!(clock.epoch_seconds(), before + 90);
    }

    #[test]
    fn test_today_is_day_granular() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 23, 59, 59).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }
}
