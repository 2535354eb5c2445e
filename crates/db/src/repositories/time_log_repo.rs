//! Repository for the `time_logs` table.
//!
//! The write path is split into `find_by_category_and_date` plus
//! `insert`/`update_existing` rather than a single `ON CONFLICT` statement:
//! the handler needs to tell the caller whether the write created a new row
//! or revised an existing one.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use timetrack_core::types::DbId;

use crate::models::time_log::{NewTimeLog, TimeLog};

const COLUMNS: &str = "id, category_id, date, total_time, notes";

/// CRUD and month-sum operations for time logs.
pub struct TimeLogRepo;

impl TimeLogRepo {
    /// List logs, newest date first, optionally bounded by an inclusive date
    /// range and/or restricted to one category.
    pub async fn list(
        pool: &SqlitePool,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        category_id: Option<DbId>,
    ) -> Result<Vec<TimeLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_logs \
             WHERE (?1 IS NULL OR date >= ?1) \
               AND (?2 IS NULL OR date <= ?2) \
               AND (?3 IS NULL OR category_id = ?3) \
             ORDER BY date DESC, id ASC"
        );
        sqlx::query_as::<_, TimeLog>(&query)
            .bind(start_date)
            .bind(end_date)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Find the single log for a (category, date) pair, if any.
    pub async fn find_by_category_and_date(
        pool: &SqlitePool,
        category_id: DbId,
        date: NaiveDate,
    ) -> Result<Option<TimeLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_logs WHERE category_id = ?1 AND date = ?2"
        );
        sqlx::query_as::<_, TimeLog>(&query)
            .bind(category_id)
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new log row, returning it.
    pub async fn insert(pool: &SqlitePool, input: &NewTimeLog) -> Result<TimeLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_logs (category_id, date, total_time, notes) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeLog>(&query)
            .bind(input.category_id)
            .bind(input.date)
            .bind(input.total_time)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Replace the `total_time` and `notes` of an existing log row.
    pub async fn update_existing(
        pool: &SqlitePool,
        id: DbId,
        total_time: i64,
        notes: Option<&str>,
    ) -> Result<TimeLog, sqlx::Error> {
        let query = format!(
            "UPDATE time_logs SET total_time = ?1, notes = ?2 \
             WHERE id = ?3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeLog>(&query)
            .bind(total_time)
            .bind(notes)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Sum of `total_time` for a category within `[month_start, month_end]`,
    /// excluding any log on `exclude_date`.
    ///
    /// Used by the threshold check: the incoming value for `exclude_date`
    /// replaces whatever was logged on that day, so that day's prior row is
    /// left out of the sum entirely.
    pub async fn month_total_excluding(
        pool: &SqlitePool,
        category_id: DbId,
        month_start: NaiveDate,
        month_end: NaiveDate,
        exclude_date: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(total_time), 0) FROM time_logs \
             WHERE category_id = ?1 AND date >= ?2 AND date <= ?3 AND date != ?4",
        )
        .bind(category_id)
        .bind(month_start)
        .bind(month_end)
        .bind(exclude_date)
        .fetch_one(pool)
        .await
    }

    /// Delete a log by ID.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM time_logs WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
