//! Repository for the `categories` table.

use sqlx::SqlitePool;
use timetrack_core::types::DbId;

use crate::models::category::{Category, CategoryValues};

const COLUMNS: &str = "id, name, parent_id, color, threshold_minutes";

/// CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List every category, ordered by name so both the flat read shape and
    /// tree assembly come out alphabetical.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Find a category by ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = ?1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new category, returning the created row.
    ///
    /// Duplicate names hit the `uq_categories_name` index; the violation is
    /// classified to a 409 at the API boundary.
    pub async fn create(pool: &SqlitePool, input: &CategoryValues) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, parent_id, color, threshold_minutes) \
             VALUES (?1, ?2, ?3, ?4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(input.parent_id)
            .bind(&input.color)
            .bind(input.threshold_minutes)
            .fetch_one(pool)
            .await
    }

    /// Replace every column of a category with the given values. Returns
    /// `None` when the id does not exist. The handler merges partial
    /// payloads against the current row before calling this, so `NULL`
    /// values here mean "clear the column", not "keep it".
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &CategoryValues,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET \
                name = ?1, \
                parent_id = ?2, \
                color = ?3, \
                threshold_minutes = ?4 \
             WHERE id = ?5 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(input.parent_id)
            .bind(&input.color)
            .bind(input.threshold_minutes)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category by ID. Foreign-key cascades remove descendant
    /// categories and every time log in the subtree.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
