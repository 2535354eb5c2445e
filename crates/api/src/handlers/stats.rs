//! Handler for aggregated time totals.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use serde::Deserialize;

use timetrack_core::stats::GroupBy;
use timetrack_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::query::parse_range;
use crate::state::AppState;

/// Query parameters for the stats endpoint.
#[derive(Debug, Deserialize)]
pub struct StatsParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub group_by: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /stats
// ---------------------------------------------------------------------------

/// Summed time totals grouped by category (default), date, week, or month.
///
/// Unrecognized `group_by` values fall back to category grouping;
/// malformed date bounds are a 400.
pub async fn totals(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> AppResult<Response> {
    let (start, end) = parse_range(params.start_date.as_deref(), params.end_date.as_deref())?;
    let group_by = GroupBy::from_param(params.group_by.as_deref());
    tracing::debug!(?group_by, "Stats query");

    let response = match group_by {
        GroupBy::Category => {
            Json(StatsRepo::totals_by_category(&state.pool, start, end).await?).into_response()
        }
        GroupBy::Date => {
            Json(StatsRepo::totals_by_date(&state.pool, start, end).await?).into_response()
        }
        GroupBy::Week => {
            Json(StatsRepo::totals_by_week(&state.pool, start, end).await?).into_response()
        }
        GroupBy::Month => {
            Json(StatsRepo::totals_by_month(&state.pool, start, end).await?).into_response()
        }
    };
    Ok(response)
}
