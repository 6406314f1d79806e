//! Evaluation-time source.
//!
//! Everything date-relative (streaks, `today`, the week strip, id timestamps)
//! reads time through [`Clock`] so tests can pin it.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// Calendar date format used by habit dates and mood entries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Current UTC calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Midnight UTC of `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` date string.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// ISO-8601 timestamp with millisecond precision and `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, parse_date, Clock, FixedClock};
    use chrono::NaiveDate;

    #[test]
    fn fixed_clock_reports_its_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let clock = FixedClock::at_date(date);
        assert_eq!(clock.today(), date);
        assert_eq!(format_timestamp(clock.now()), "2026-03-09T00:00:00.000Z");
    }

    #[test]
    fn parse_date_rejects_timestamps() {
        assert!(parse_date("2026-03-09").is_some());
        assert!(parse_date("2026-03-09T10:00:00Z").is_none());
        assert!(parse_date("yesterday").is_none());
    }
}
