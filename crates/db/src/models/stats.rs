//! Row shapes returned by the stats aggregation queries.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use timetrack_core::types::DbId;

/// Per-category total with the category metadata the dashboard renders.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryTotal {
    pub category_id: DbId,
    pub name: String,
    pub color: String,
    pub threshold_minutes: Option<i64>,
    pub total_time: i64,
}

/// Per-date total.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DateTotal {
    pub date: NaiveDate,
    pub total_time: i64,
}

/// Per-week total. The bucket runs Monday through the Sunday on/after each
/// log date; both bounds are returned so clients can label the bucket.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WeekTotal {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_time: i64,
}

/// Per-calendar-month total. `month` is the `YYYY-MM` prefix of the date.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthTotal {
    pub month: String,
    pub total_time: i64,
}
