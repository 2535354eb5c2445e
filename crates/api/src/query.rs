//! Shared query-parameter handling for API handlers.

use chrono::NaiveDate;

use crate::error::AppResult;

/// Validate an optional inclusive date range (`?start_date=&end_date=`).
///
/// Bounds arrive as raw strings so malformed values surface as a 400 with
/// the standard error body instead of an extractor rejection. Each bound is
/// validated independently; an inverted range simply matches nothing.
pub fn parse_range(
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> AppResult<(Option<NaiveDate>, Option<NaiveDate>)> {
    let start = start_date
        .map(|s| timetrack_core::timelog::parse_date("start_date", s))
        .transpose()?;
    let end = end_date
        .map(|s| timetrack_core::timelog::parse_date("end_date", s))
        .transpose()?;
    Ok((start, end))
}
