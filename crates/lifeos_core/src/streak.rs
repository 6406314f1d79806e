//! Habit streak calculation.
//!
//! # Invariants
//! - A streak only counts when the most recent completion is today or
//!   yesterday; otherwise it is 0.
//! - Counting walks back from the most recent date and stops at the first
//!   link that is not exactly one day, including a repeated date.

use crate::clock::parse_date;
use chrono::{Duration, NaiveDate};

/// Counts consecutive completed days ending today or yesterday.
///
/// Entries that are not `YYYY-MM-DD` dates are ignored.
pub fn calculate_streak<S: AsRef<str>>(completed_dates: &[S], today: NaiveDate) -> u32 {
    let mut dates = completed_dates
        .iter()
        .filter_map(|value| parse_date(value.as_ref()))
        .collect::<Vec<_>>();
    dates.sort_unstable_by(|left, right| right.cmp(left));

    let Some(most_recent) = dates.first().copied() else {
        return 0;
    };
    let yesterday = today - Duration::days(1);
    if most_recent != today && most_recent != yesterday {
        return 0;
    }

    let mut streak = 1;
    for pair in dates.windows(2) {
        if (pair[0] - pair[1]).num_days() != 1 {
            break;
        }
        streak += 1;
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::calculate_streak;
    use chrono::{Duration, NaiveDate};

    fn day(offset: i64) -> String {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        (today + Duration::days(offset)).format("%Y-%m-%d").to_string()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn empty_history_has_no_streak() {
        let empty: [&str; 0] = [];
        assert_eq!(calculate_streak(&empty, today()), 0);
    }

    #[test]
    fn today_alone_counts_one() {
        assert_eq!(calculate_streak(&[day(0)], today()), 1);
    }

    #[test]
    fn consecutive_days_count_in_any_stored_order() {
        assert_eq!(calculate_streak(&[day(-2), day(0), day(-1)], today()), 3);
    }

    #[test]
    fn streak_may_end_yesterday() {
        assert_eq!(calculate_streak(&[day(-1), day(-2)], today()), 2);
    }

    #[test]
    fn lapsed_history_resets_to_zero() {
        assert_eq!(calculate_streak(&[day(-2)], today()), 0);
        assert_eq!(calculate_streak(&[day(-2), day(-3), day(-4)], today()), 0);
    }

    #[test]
    fn gap_stops_counting_older_history() {
        assert_eq!(calculate_streak(&[day(0), day(-1), day(-3)], today()), 2);
        assert_eq!(
            calculate_streak(&[day(0), day(-1), day(-3), day(-4), day(-5)], today()),
            2
        );
    }

    #[test]
    fn duplicate_date_stops_counting() {
        assert_eq!(calculate_streak(&[day(0), day(0), day(-1)], today()), 1);
    }

    #[test]
    fn future_dates_do_not_start_a_streak() {
        assert_eq!(calculate_streak(&[day(1), day(0)], today()), 0);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        assert_eq!(calculate_streak(&["not-a-date".to_string(), day(0)], today()), 1);
    }
}
