//! Time-log validation and calendar helpers.
//!
//! A time log is one (category, date) entry of non-negative minutes. This
//! module validates the incoming fields and provides the calendar math the
//! store queries are built on: calendar-month bounds for the threshold
//! check and Sunday-anchored week bounds for weekly aggregation.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::error::CoreError;

/// Parse a `YYYY-MM-DD` date string, naming the offending field on failure.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CoreError::Validation(format!("{field} must be a valid YYYY-MM-DD date")))
}

/// Validate a `total_time` value: minutes must be non-negative.
pub fn validate_total_time(total_time: i64) -> Result<(), CoreError> {
    if total_time < 0 {
        return Err(CoreError::Validation(format!(
            "total_time must be a non-negative number of minutes, got {total_time}"
        )));
    }
    Ok(())
}

/// First and last day (inclusive) of the calendar month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
    let next_month_start = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    let end = next_month_start
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .unwrap_or(date);
    (start, end)
}

/// Week bucket containing `date`: ends on the nearest Sunday on/after the
/// date and starts six days before that.
///
/// Canonical definition of the Monday..Sunday window; the store's SQL week
/// bucketing is tested against this function.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_to_sunday = (7 - date.weekday().num_days_from_sunday()) % 7;
    let end = date
        .checked_add_days(Days::new(u64::from(days_to_sunday)))
        .unwrap_or(date);
    let start = end.checked_sub_days(Days::new(6)).unwrap_or(end);
    (start, end)
}

/// Advisory threshold breach: the month total that tripped the configured cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThresholdBreach {
    pub threshold_minutes: i64,
    pub month_total: i64,
}

/// Evaluate a category's monthly threshold against a pending write.
///
/// `other_logged` is the sum of all other logs for the category in the
/// month; `new_entry` is the incoming value. Returns a breach when the
/// combined total exceeds the threshold. The write proceeds either way.
pub fn evaluate_threshold(
    threshold_minutes: Option<i64>,
    other_logged: i64,
    new_entry: i64,
) -> Option<ThresholdBreach> {
    let threshold = threshold_minutes?;
    let month_total = other_logged + new_entry;
    (month_total > threshold).then_some(ThresholdBreach {
        threshold_minutes: threshold,
        month_total,
    })
}
