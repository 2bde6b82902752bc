use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub category_id: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub category_id: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub id: Option<String>,
    pub category_id: String,
    pub display_order: Option<i64>,
}

/// Explicit edit of one product's order. `null` (or a missing field) clears it.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub display_order: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AutoOrganizeResponse {
    pub organized: usize,
    pub start_order: Option<i64>,
    pub end_order: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FixDuplicatesResponse {
    pub updated: usize,
}
