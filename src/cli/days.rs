//! `days` subcommand: remaining days until a due date.

use crate::dates::{CountdownMode, countdown, parse_due_date};
use crate::error::{TaskError, TaskResult};
use chrono::{DateTime, NaiveTime, Utc};
use clap::Args;

/// Arguments for the days subcommand
#[derive(Args, Debug)]
pub struct DaysArgs {
    /// Due date (YYYY-MM-DD)
    pub due: String,

    /// Count from midnight UTC of this date instead of now (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,
}

impl DaysArgs {
    /// Reference instant: `--from` at midnight UTC, or `now`.
    pub fn reference(&self, now: DateTime<Utc>) -> TaskResult<DateTime<Utc>> {
        match self.from.as_deref() {
            None => Ok(now),
            Some(value) => parse_due_date(value)?
                .map(|d| d.and_time(NaiveTime::MIN).and_utc())
                .ok_or_else(|| TaskError::invalid_value("from", "--from must not be empty")),
        }
    }

    /// Signed number of days remaining.
    pub fn compute(&self, now: DateTime<Utc>, mode: CountdownMode) -> TaskResult<i64> {
        let due = parse_due_date(&self.due)?
            .ok_or_else(|| TaskError::invalid_value("due", "due date must not be empty"))?;
        Ok(countdown(due, self.reference(now)?, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::TimeZone;

    fn args(due: &str, from: Option<&str>) -> DaysArgs {
        DaysArgs {
            due: due.to_string(),
            from: from.map(str::to_string),
        }
    }

    #[test]
    fn test_from_date() {
        let now = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let days = args("2030-01-04", Some("2030-01-01"))
            .compute(now, CountdownMode::Timestamp)
            .unwrap();
        assert_eq!(days, 3);
    }

    #[test]
    fn test_from_now() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap();
        let a = args("2030-01-02", None);
        assert_eq!(a.compute(now, CountdownMode::Timestamp).unwrap(), 1);
        assert_eq!(args("2030-01-01", None).compute(now, CountdownMode::Timestamp).unwrap(), 0);
        assert_eq!(args("2030-01-01", None).compute(now, CountdownMode::Calendar).unwrap(), 0);
    }

    #[test]
    fn test_invalid_input() {
        let now = Utc::now();
        let err = args("", None).compute(now, CountdownMode::Timestamp).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("due"));
        let err = args("2030-01-01", Some("soon"))
            .compute(now, CountdownMode::Timestamp)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFieldValue);
    }
}
