//! Due-date parsing and countdown arithmetic.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TaskError, TaskResult};

/// Wire/input format for due dates (same as an HTML date input).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// How remaining days are counted for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownMode {
    /// Due date at 00:00 UTC against the full current timestamp, rounded up.
    /// Can be off by one near day boundaries depending on time of day.
    #[default]
    Timestamp,
    /// Whole calendar days between the current UTC date and the due date.
    Calendar,
}

impl CountdownMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "timestamp" => Some(CountdownMode::Timestamp),
            "calendar" | "date" => Some(CountdownMode::Calendar),
            _ => None,
        }
    }
}

/// `ceil((due_date - reference_now) / 1 day)`, with `due_date` taken as
/// midnight UTC. Zero, positive or negative.
pub fn days_remaining(due_date: NaiveDate, reference_now: DateTime<Utc>) -> i64 {
    let due = due_date.and_time(NaiveTime::MIN).and_utc();
    let diff_ms = (due - reference_now).num_milliseconds();
    let days = diff_ms.div_euclid(MS_PER_DAY);
    if diff_ms.rem_euclid(MS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

/// Whole days from `today` to `due_date`.
pub fn calendar_days_remaining(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (due_date - today).num_days()
}

/// Dispatch on the configured countdown mode.
pub fn countdown(due_date: NaiveDate, now: DateTime<Utc>, mode: CountdownMode) -> i64 {
    match mode {
        CountdownMode::Timestamp => days_remaining(due_date, now),
        CountdownMode::Calendar => calendar_days_remaining(due_date, now.date_naive()),
    }
}

/// Parse a date field value. An empty (or blank) value clears the field.
pub fn parse_due_date(value: &str) -> TaskResult<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|e| {
            TaskError::invalid_value(
                "due_date",
                &format!("'{}' is not a date in YYYY-MM-DD form: {}", value, e),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::{Duration, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn midnight(d: NaiveDate) -> DateTime<Utc> {
        d.and_time(NaiveTime::MIN).and_utc()
    }

    #[test]
    fn test_same_day_is_zero() {
        let today = date(2024, 3, 10);
        assert_eq!(days_remaining(today, midnight(today)), 0);
    }

    #[test]
    fn test_three_days_ahead() {
        let today = date(2024, 3, 10);
        let due = today + Duration::days(3);
        assert_eq!(days_remaining(due, midnight(today)), 3);
    }

    #[test]
    fn test_partial_day_rounds_up() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 18, 30, 0).unwrap();
        // 5.5 hours until midnight of the 11th.
        assert_eq!(days_remaining(date(2024, 3, 11), now), 1);
        // Today's midnight is already past: -0.77 days rounds up to 0.
        assert_eq!(days_remaining(date(2024, 3, 10), now), 0);
        // Yesterday: -1.77 rounds up to -1.
        assert_eq!(days_remaining(date(2024, 3, 9), now), -1);
    }

    #[test]
    fn test_past_due_is_negative() {
        let today = date(2024, 3, 10);
        assert_eq!(days_remaining(date(2024, 3, 5), midnight(today)), -5);
    }

    #[test]
    fn test_calendar_mode_ignores_time_of_day() {
        let late = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 0).unwrap();
        assert_eq!(countdown(date(2024, 3, 11), late, CountdownMode::Calendar), 1);
        assert_eq!(countdown(date(2024, 3, 10), late, CountdownMode::Calendar), 0);
        assert_eq!(countdown(date(2024, 3, 10), late, CountdownMode::Timestamp), 0);
    }

    #[test]
    fn test_countdown_mode_from_str() {
        assert_eq!(CountdownMode::from_str("Timestamp"), Some(CountdownMode::Timestamp));
        assert_eq!(CountdownMode::from_str("calendar"), Some(CountdownMode::Calendar));
        assert_eq!(CountdownMode::from_str("weekly"), None);
    }

    #[test]
    fn test_parse_due_date() {
        assert_eq!(parse_due_date("2030-01-01").unwrap(), Some(date(2030, 1, 1)));
        assert_eq!(parse_due_date("").unwrap(), None);
        assert_eq!(parse_due_date("  ").unwrap(), None);

        let err = parse_due_date("01/02/2030").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFieldValue);
        assert_eq!(err.field.as_deref(), Some("due_date"));

        assert!(parse_due_date("2030-02-30").is_err());
    }
}
