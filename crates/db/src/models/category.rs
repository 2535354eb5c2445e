//! Category models, DTOs, and the flat-list-to-tree builder.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use timetrack_core::types::DbId;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
    pub color: String,
    pub threshold_minutes: Option<i64>,
}

/// Validated column values for a category write. Built by the handler after
/// name/parent/threshold validation; `color` is already defaulted. Used for
/// inserts and for full-row updates once a partial payload has been merged
/// with the current row.
#[derive(Debug, Clone)]
pub struct CategoryValues {
    pub name: String,
    pub parent_id: Option<DbId>,
    pub color: String,
    pub threshold_minutes: Option<i64>,
}

/// DTO for updating an existing category. Absent fields are left unchanged.
///
/// For the two nullable columns the outer `Option` records presence: an
/// absent field deserializes to `None` (keep the current value) while an
/// explicit JSON `null` becomes `Some(None)` (clear it), so a subcategory
/// can be promoted to a root and a threshold can be removed.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "some_if_present")]
    pub parent_id: Option<Option<DbId>>,
    pub color: Option<String>,
    #[serde(default, deserialize_with = "some_if_present")]
    pub threshold_minutes: Option<Option<i64>>,
}

/// Deserialize a field that appeared in the payload as `Some(value)`, where
/// `value` itself may be `None` for JSON `null`. Missing fields never reach
/// this function; `#[serde(default)]` leaves them as the outer `None`.
fn some_if_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A category with its children attached, for the nested tree read shape.
///
/// `children` is always present (empty for leaves) so clients get one
/// consistent contract.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTreeNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<CategoryTreeNode>,
}

/// Assemble a nested tree from a flat, name-ordered category list.
///
/// Roots are the rows with a null `parent_id`; each node's children are the
/// rows pointing at it. Input order is preserved, so sibling order follows
/// the query's `ORDER BY name`. Cycles are prevented at write time, but the
/// builder still tracks visited ids so hand-edited data cannot recurse
/// forever; a row already placed in the tree is not attached a second time.
pub fn build_tree(categories: Vec<Category>) -> Vec<CategoryTreeNode> {
    let mut visited = HashSet::new();
    categories
        .iter()
        .filter(|c| c.parent_id.is_none())
        .map(|root| attach_children(root, &categories, &mut visited))
        .collect()
}

fn attach_children(
    node: &Category,
    all: &[Category],
    visited: &mut HashSet<DbId>,
) -> CategoryTreeNode {
    visited.insert(node.id);
    let mut children = Vec::new();
    for child in all {
        if child.parent_id == Some(node.id) && !visited.contains(&child.id) {
            children.push(attach_children(child, all, visited));
        }
    }
    CategoryTreeNode {
        category: node.clone(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: DbId, name: &str, parent_id: Option<DbId>) -> Category {
        Category {
            id,
            name: name.to_string(),
            parent_id,
            color: "#808080".to_string(),
            threshold_minutes: None,
        }
    }

    #[test]
    fn empty_input_builds_empty_forest() {
        assert!(build_tree(Vec::new()).is_empty());
    }

    #[test]
    fn roots_and_children_are_grouped() {
        // Name-ordered input, two roots with one subtree each.
        let tree = build_tree(vec![
            cat(3, "Chores", None),
            cat(4, "Cleaning", Some(3)),
            cat(2, "Coding", Some(1)),
            cat(1, "Work", None),
        ]);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].category.name, "Chores");
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].category.name, "Cleaning");
        assert_eq!(tree[1].category.name, "Work");
        assert_eq!(tree[1].children[0].category.name, "Coding");
    }

    #[test]
    fn leaves_carry_empty_children() {
        let tree = build_tree(vec![cat(1, "Work", None)]);
        assert!(tree[0].children.is_empty());
        // Contract: children serializes as [] rather than being omitted.
        let json = serde_json::to_value(&tree[0]).unwrap();
        assert_eq!(json["children"], serde_json::json!([]));
    }

    #[test]
    fn nesting_goes_arbitrarily_deep() {
        let tree = build_tree(vec![
            cat(1, "A", None),
            cat(2, "B", Some(1)),
            cat(3, "C", Some(2)),
        ]);
        assert_eq!(tree[0].children[0].children[0].category.id, 3);
    }

    #[test]
    fn sibling_order_follows_input_order() {
        let tree = build_tree(vec![
            cat(1, "Work", None),
            cat(3, "Coding", Some(1)),
            cat(2, "Meetings", Some(1)),
        ]);
        let names: Vec<_> = tree[0]
            .children
            .iter()
            .map(|c| c.category.name.as_str())
            .collect();
        assert_eq!(names, vec!["Coding", "Meetings"]);
    }

    #[test]
    fn update_payload_distinguishes_null_from_absent() {
        let absent: UpdateCategory = serde_json::from_str(r#"{"name": "Work"}"#).unwrap();
        assert_eq!(absent.parent_id, None);
        assert_eq!(absent.threshold_minutes, None);

        let nulled: UpdateCategory =
            serde_json::from_str(r#"{"parent_id": null, "threshold_minutes": null}"#).unwrap();
        assert_eq!(nulled.parent_id, Some(None));
        assert_eq!(nulled.threshold_minutes, Some(None));

        let set: UpdateCategory =
            serde_json::from_str(r#"{"parent_id": 7, "threshold_minutes": 600}"#).unwrap();
        assert_eq!(set.parent_id, Some(Some(7)));
        assert_eq!(set.threshold_minutes, Some(Some(600)));
    }

    #[test]
    fn corrupted_cycle_does_not_recurse_forever() {
        // 1 and 2 point at each other; neither is a root, so the forest is
        // empty -- the important part is that this returns at all.
        let tree = build_tree(vec![cat(1, "A", Some(2)), cat(2, "B", Some(1))]);
        assert!(tree.is_empty());
    }
}
