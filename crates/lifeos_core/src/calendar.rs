//! Date read helpers for the presentation layer.

use crate::clock::format_date;
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

const DAY_LABELS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];
const DAYS_AROUND_TODAY: i64 = 3;

/// One cell of the week strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekDay {
    /// Single-letter weekday label, Sunday first.
    pub day: String,
    /// Zero-padded day of month, e.g. `07`.
    pub date: String,
    /// Full `YYYY-MM-DD` date.
    pub date_str: String,
    pub is_today: bool,
}

/// `YYYY-MM-DD` for `today`.
pub fn today_string(today: NaiveDate) -> String {
    format_date(today)
}

/// Seven days centred on `today`: three before, today, three after.
pub fn week_days(today: NaiveDate) -> Vec<WeekDay> {
    (-DAYS_AROUND_TODAY..=DAYS_AROUND_TODAY)
        .map(|offset| {
            let date = today + Duration::days(offset);
            WeekDay {
                day: DAY_LABELS[date.weekday().num_days_from_sunday() as usize].to_string(),
                date: format!("{:02}", date.day()),
                date_str: format_date(date),
                is_today: offset == 0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{today_string, week_days};
    use chrono::NaiveDate;

    #[test]
    fn week_strip_spans_month_boundary() {
        // Thursday.
        let today = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let days = week_days(today);

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date_str, "2026-09-28");
        assert_eq!(days[0].day, "M");
        assert_eq!(days[3].date, "01");
        assert_eq!(days[3].day, "T");
        assert!(days[3].is_today);
        assert_eq!(days.iter().filter(|day| day.is_today).count(), 1);
        assert_eq!(days[6].date_str, "2026-10-04");
        assert_eq!(days[6].day, "S");
    }

    #[test]
    fn today_is_zero_padded() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        assert_eq!(today_string(today), "2026-02-03");
    }
}
