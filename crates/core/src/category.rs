//! Category hierarchy validation.
//!
//! Categories form a tree via a nullable `parent_id` self-reference. The
//! store enforces name uniqueness; this module enforces everything the
//! schema cannot: non-blank names, positive thresholds, and acyclicity of
//! the parent graph when a category is created or reparented.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::types::DbId;

/// Display color assigned when a category is created without one.
pub const DEFAULT_COLOR: &str = "#808080";

/// Validate a category name: must be present and non-blank after trimming.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "category name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate an optional monthly threshold: when present it must be positive.
pub fn validate_threshold(threshold_minutes: Option<i64>) -> Result<(), CoreError> {
    if let Some(minutes) = threshold_minutes {
        if minutes <= 0 {
            return Err(CoreError::Validation(format!(
                "threshold_minutes must be a positive number of minutes, got {minutes}"
            )));
        }
    }
    Ok(())
}

/// Check that reparenting category `id` under `new_parent_id` keeps the
/// hierarchy acyclic.
///
/// `parent_of` maps every existing category id to its current parent.
/// Walks upward from the proposed parent; encountering `id` means the new
/// parent is a descendant of the category being moved (or the category
/// itself). The walk is bounded by the map size so corrupted data with a
/// pre-existing cycle surfaces as an error instead of looping forever.
pub fn ensure_acyclic(
    parent_of: &HashMap<DbId, Option<DbId>>,
    id: DbId,
    new_parent_id: DbId,
) -> Result<(), CoreError> {
    if new_parent_id == id {
        return Err(CoreError::Validation(
            "a category cannot be its own parent".to_string(),
        ));
    }

    let mut current = Some(new_parent_id);
    let mut hops = 0usize;
    while let Some(cursor) = current {
        if cursor == id {
            return Err(CoreError::Validation(
                "cannot move a category under one of its own descendants".to_string(),
            ));
        }
        hops += 1;
        if hops > parent_of.len() {
            return Err(CoreError::Internal(
                "category hierarchy contains a cycle".to_string(),
            ));
        }
        current = parent_of.get(&cursor).copied().flatten();
    }

    Ok(())
}
