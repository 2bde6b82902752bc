use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product as seen by the ordering logic.
///
/// `display_order` of `None` means unordered: shown after every ordered
/// product, newest first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub category_id: String,
    #[serde(default)]
    pub display_order: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn in_category(&self, category_id: &str) -> bool {
        self.category_id == category_id
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderAssignment {
    pub item_id: String,
    pub new_order: i64,
}

/// Inclusive range of order values handed out by an auto-organize pass.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRange {
    pub start_order: i64,
    pub end_order: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MissingOrderPlan {
    pub instructions: Vec<OrderAssignment>,
    pub range: Option<OrderRange>,
}

impl MissingOrderPlan {
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

/// Derived counts for one category, recomputed whenever the product list or
/// the selected category changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderingSummary {
    pub category_id: String,
    pub total: usize,
    pub next_available_order: i64,
    pub unordered: usize,
    pub duplicates: usize,
}

impl OrderingSummary {
    pub fn can_auto_organize(&self) -> bool {
        self.unordered > 0
    }

    pub fn can_fix_duplicates(&self) -> bool {
        self.duplicates > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_format() {
        let product: Product = serde_json::from_str(
            r#"{"id":"p1","categoryId":"benches","displayOrder":null,"createdAt":"2024-03-01T12:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(product.display_order, None);
        assert!(product.in_category("benches"));

        let missing: Product = serde_json::from_str(
            r#"{"id":"p2","categoryId":"benches","createdAt":"2024-03-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(missing.display_order, None);
    }

    #[test]
    fn test_assignment_wire_format() {
        let assignment = OrderAssignment {
            item_id: "p1".to_string(),
            new_order: 4,
        };

        assert_eq!(
            serde_json::to_string(&assignment).unwrap(),
            r#"{"itemId":"p1","newOrder":4}"#
        );
    }
}
