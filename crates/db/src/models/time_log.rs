//! Time-log models and DTOs.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use timetrack_core::types::DbId;

/// A row from the `time_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeLog {
    pub id: DbId,
    pub category_id: DbId,
    pub date: NaiveDate,
    pub total_time: i64,
    pub notes: Option<String>,
}

/// Validated values for a time-log write (insert or in-place update).
#[derive(Debug, Clone)]
pub struct NewTimeLog {
    pub category_id: DbId,
    pub date: NaiveDate,
    pub total_time: i64,
    pub notes: Option<String>,
}
