//! Handlers for the category hierarchy.
//!
//! Categories form a tree (nullable `parent_id` self-reference). Writes
//! enforce the hierarchy invariants: names are unique and non-blank,
//! thresholds positive, parents must exist, and reparenting may never
//! create a cycle.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use serde::Deserialize;

use timetrack_core::category::{self, DEFAULT_COLOR};
use timetrack_core::error::CoreError;
use timetrack_core::types::DbId;
use timetrack_db::models::category::{
    self as category_model, Category, CategoryValues, UpdateCategory,
};
use timetrack_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters / payloads
// ---------------------------------------------------------------------------

/// Query parameters for listing categories.
#[derive(Debug, Deserialize)]
pub struct ListCategoriesParams {
    /// `?flat=true` returns the name-ordered flat list instead of the tree.
    #[serde(default)]
    pub flat: bool,
}

/// Payload for creating a category. `name` stays optional here so a missing
/// field produces the standard 400 body rather than an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryBody {
    pub name: Option<String>,
    pub parent_id: Option<DbId>,
    pub color: Option<String>,
    pub threshold_minutes: Option<i64>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a category exists, returning the full row.
async fn ensure_category_exists(pool: &sqlx::SqlitePool, id: DbId) -> AppResult<Category> {
    CategoryRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        })
    })
}

/// Verify that a proposed parent id references an existing category.
///
/// A dangling parent is a validation failure (400), not a 404: the missing
/// id is request data, not the addressed resource.
async fn ensure_parent_exists(pool: &sqlx::SqlitePool, parent_id: DbId) -> AppResult<()> {
    if CategoryRepo::find_by_id(pool, parent_id).await?.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "parent category does not exist".to_string(),
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// GET /categories
// ---------------------------------------------------------------------------

/// List all categories, nested by default or flat with `?flat=true`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListCategoriesParams>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_all(&state.pool).await?;
    tracing::debug!(count = categories.len(), flat = params.flat, "Listed categories");

    if params.flat {
        Ok(Json(categories).into_response())
    } else {
        Ok(Json(category_model::build_tree(categories)).into_response())
    }
}

// ---------------------------------------------------------------------------
// POST /categories
// ---------------------------------------------------------------------------

/// Create a new category.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryBody>,
) -> AppResult<impl IntoResponse> {
    let name = body
        .name
        .ok_or_else(|| CoreError::Validation("category name is required".to_string()))?;
    category::validate_name(&name)?;
    category::validate_threshold(body.threshold_minutes)?;

    if let Some(parent_id) = body.parent_id {
        ensure_parent_exists(&state.pool, parent_id).await?;
    }

    let input = CategoryValues {
        name: name.trim().to_string(),
        parent_id: body.parent_id,
        color: body.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        threshold_minutes: body.threshold_minutes,
    };

    let created = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(id = created.id, name = %created.name, "Category created");
    Ok((StatusCode::CREATED, Json(created)))
}

// ---------------------------------------------------------------------------
// PUT /categories/{id}
// ---------------------------------------------------------------------------

/// Update any subset of a category's fields.
///
/// Absent fields keep their current values; an explicit `null` clears
/// `parent_id` (promoting a subcategory to a root) or `threshold_minutes`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    let existing = ensure_category_exists(&state.pool, id).await?;

    if let Some(ref name) = input.name {
        category::validate_name(name)?;
    }
    if let Some(threshold) = input.threshold_minutes {
        category::validate_threshold(threshold)?;
    }

    // Clearing the parent cannot create a cycle; only a concrete new parent
    // needs the existence check and the ancestor walk.
    if let Some(Some(new_parent_id)) = input.parent_id {
        ensure_parent_exists(&state.pool, new_parent_id).await?;

        // Walk the proposed ancestor chain over a snapshot of the hierarchy.
        let parent_of: HashMap<DbId, Option<DbId>> = CategoryRepo::list_all(&state.pool)
            .await?
            .into_iter()
            .map(|c| (c.id, c.parent_id))
            .collect();
        category::ensure_acyclic(&parent_of, id, new_parent_id)?;
    }

    let values = CategoryValues {
        name: input
            .name
            .map(|n| n.trim().to_string())
            .unwrap_or(existing.name),
        parent_id: input.parent_id.unwrap_or(existing.parent_id),
        color: input.color.unwrap_or(existing.color),
        threshold_minutes: input.threshold_minutes.unwrap_or(existing.threshold_minutes),
    };

    let updated = CategoryRepo::update(&state.pool, id, &values)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;
    tracing::info!(id = updated.id, "Category updated");
    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// DELETE /categories/{id}
// ---------------------------------------------------------------------------

/// Delete a category; cascades to descendants and their time logs.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CategoryRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Category deleted (cascade)");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
    }
}
