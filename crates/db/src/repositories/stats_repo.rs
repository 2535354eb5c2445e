//! Aggregation queries for the stats endpoint.
//!
//! Every query sums `total_time` over an optional inclusive date range.
//! Dates are stored as `YYYY-MM-DD` text, so lexicographic comparison and
//! SQLite's date functions both work directly on the column.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::stats::{CategoryTotal, DateTotal, MonthTotal, WeekTotal};

const RANGE_FILTER: &str = "(?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date <= ?2)";

/// Grouped time totals for the stats endpoint.
pub struct StatsRepo;

impl StatsRepo {
    /// Total per category (with display metadata), busiest first. Categories
    /// with no logs in range produce no row.
    pub async fn totals_by_category(
        pool: &SqlitePool,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<CategoryTotal>, sqlx::Error> {
        let query = format!(
            "SELECT c.id AS category_id, c.name, c.color, c.threshold_minutes, \
                    SUM(t.total_time) AS total_time \
             FROM time_logs t \
             JOIN categories c ON c.id = t.category_id \
             WHERE {RANGE_FILTER} \
             GROUP BY c.id, c.name, c.color, c.threshold_minutes \
             ORDER BY total_time DESC"
        );
        sqlx::query_as::<_, CategoryTotal>(&query)
            .bind(start_date)
            .bind(end_date)
            .fetch_all(pool)
            .await
    }

    /// Total per distinct date, ascending.
    pub async fn totals_by_date(
        pool: &SqlitePool,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<DateTotal>, sqlx::Error> {
        let query = format!(
            "SELECT date, SUM(total_time) AS total_time \
             FROM time_logs \
             WHERE {RANGE_FILTER} \
             GROUP BY date \
             ORDER BY date ASC"
        );
        sqlx::query_as::<_, DateTotal>(&query)
            .bind(start_date)
            .bind(end_date)
            .fetch_all(pool)
            .await
    }

    /// Total per week bucket, ascending by week start.
    ///
    /// `date(d, 'weekday 0')` is the nearest Sunday on/after `d` (the date
    /// itself when it already falls on a Sunday), so each bucket runs
    /// Monday through Sunday regardless of where the user's logs start.
    pub async fn totals_by_week(
        pool: &SqlitePool,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<WeekTotal>, sqlx::Error> {
        let query = format!(
            "SELECT date(date, 'weekday 0', '-6 days') AS week_start, \
                    date(date, 'weekday 0') AS week_end, \
                    SUM(total_time) AS total_time \
             FROM time_logs \
             WHERE {RANGE_FILTER} \
             GROUP BY week_start, week_end \
             ORDER BY week_start ASC"
        );
        sqlx::query_as::<_, WeekTotal>(&query)
            .bind(start_date)
            .bind(end_date)
            .fetch_all(pool)
            .await
    }

    /// Total per calendar month (`YYYY-MM`), ascending.
    pub async fn totals_by_month(
        pool: &SqlitePool,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<MonthTotal>, sqlx::Error> {
        let query = format!(
            "SELECT strftime('%Y-%m', date) AS month, SUM(total_time) AS total_time \
             FROM time_logs \
             WHERE {RANGE_FILTER} \
             GROUP BY month \
             ORDER BY month ASC"
        );
        sqlx::query_as::<_, MonthTotal>(&query)
            .bind(start_date)
            .bind(end_date)
            .fetch_all(pool)
            .await
    }
}
