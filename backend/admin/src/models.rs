use serde::{Deserialize, Serialize};

pub const PRODUCTS: &str = "/products";
pub const AUTO_ORGANIZE: &str = "/products/auto-organize";
pub const FIX_DUPLICATES: &str = "/products/fix-duplicates";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest<'a> {
    pub category_id: &'a str,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AutoOrganizeResponse {
    pub organized: usize,
    pub start_order: Option<i64>,
    pub end_order: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct FixDuplicatesResponse {
    pub updated: usize,
}

#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}
