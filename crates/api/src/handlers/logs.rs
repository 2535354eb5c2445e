//! Handlers for daily time logs.
//!
//! A log is one (category, date) entry of minutes. Writes are upserts: a
//! second write for the same pair revises the existing row, and the
//! response distinguishes the two cases. Logs may only target
//! subcategories; a category's optional monthly threshold is checked on
//! every write and reported via advisory headers without blocking.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::Deserialize;

use timetrack_core::error::CoreError;
use timetrack_core::timelog;
use timetrack_core::types::DbId;
use timetrack_db::models::time_log::NewTimeLog;
use timetrack_db::repositories::{CategoryRepo, TimeLogRepo};

use crate::error::{AppError, AppResult};
use crate::query::parse_range;
use crate::response::{threshold_headers, SavedLog};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters / payloads
// ---------------------------------------------------------------------------

/// Query parameters for listing logs.
#[derive(Debug, Deserialize)]
pub struct ListLogsParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub category_id: Option<DbId>,
}

/// Payload for a log write. Required fields are `Option` so missing values
/// produce the standard 400 body rather than an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct SaveLogBody {
    pub category_id: Option<DbId>,
    pub date: Option<String>,
    pub total_time: Option<i64>,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /logs
// ---------------------------------------------------------------------------

/// List logs, newest first, with optional date-range and category filters.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListLogsParams>,
) -> AppResult<impl IntoResponse> {
    let (start, end) = parse_range(params.start_date.as_deref(), params.end_date.as_deref())?;
    let logs = TimeLogRepo::list(&state.pool, start, end, params.category_id).await?;
    tracing::debug!(count = logs.len(), "Listed time logs");
    Ok(Json(logs))
}

// ---------------------------------------------------------------------------
// POST /logs
// ---------------------------------------------------------------------------

/// Create or revise the log for a (category, date) pair.
///
/// Responds 201 when a new row was inserted, 200 when an existing row was
/// updated; the body carries the row plus a `created` flag either way. A
/// monthly-threshold breach adds the `x-threshold-*` headers but never
/// fails the write.
pub async fn save(
    State(state): State<AppState>,
    Json(body): Json<SaveLogBody>,
) -> AppResult<impl IntoResponse> {
    let category_id = body
        .category_id
        .ok_or_else(|| CoreError::Validation("category_id is required".to_string()))?;
    let date_str = body
        .date
        .ok_or_else(|| CoreError::Validation("date is required".to_string()))?;
    let total_time = body
        .total_time
        .ok_or_else(|| CoreError::Validation("total_time is required".to_string()))?;

    let date = timelog::parse_date("date", &date_str)?;
    timelog::validate_total_time(total_time)?;

    // Only subcategories accept direct logs; a dangling or root category id
    // is a validation failure on the request payload.
    let category = CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .ok_or_else(|| CoreError::Validation("category does not exist".to_string()))?;
    if category.parent_id.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "time can only be logged against a subcategory, not a root category".to_string(),
        )));
    }

    // Advisory monthly threshold: sum the category's other logs for the
    // calendar month, with the incoming value standing in for this date.
    let breach = if category.threshold_minutes.is_some() {
        let (month_start, month_end) = timelog::month_bounds(date);
        let other_logged = TimeLogRepo::month_total_excluding(
            &state.pool,
            category_id,
            month_start,
            month_end,
            date,
        )
        .await?;
        timelog::evaluate_threshold(category.threshold_minutes, other_logged, total_time)
    } else {
        None
    };

    if let Some(breach) = breach {
        tracing::info!(
            category_id,
            threshold = breach.threshold_minutes,
            month_total = breach.month_total,
            "Monthly threshold exceeded"
        );
    }

    let input = NewTimeLog {
        category_id,
        date,
        total_time,
        notes: body.notes,
    };

    let existing = TimeLogRepo::find_by_category_and_date(&state.pool, category_id, date).await?;
    let (status, saved) = match existing {
        Some(log) => {
            let updated = TimeLogRepo::update_existing(
                &state.pool,
                log.id,
                input.total_time,
                input.notes.as_deref(),
            )
            .await?;
            tracing::info!(id = updated.id, category_id, %date, "Time log updated");
            (
                StatusCode::OK,
                SavedLog {
                    log: updated,
                    created: false,
                },
            )
        }
        None => {
            let created = TimeLogRepo::insert(&state.pool, &input).await?;
            tracing::info!(id = created.id, category_id, %date, "Time log created");
            (
                StatusCode::CREATED,
                SavedLog {
                    log: created,
                    created: true,
                },
            )
        }
    };

    Ok((status, threshold_headers(breach), Json(saved)))
}

// ---------------------------------------------------------------------------
// DELETE /logs/{id}
// ---------------------------------------------------------------------------

/// Delete a log by ID.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TimeLogRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Time log deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "TimeLog",
            id,
        }))
    }
}
