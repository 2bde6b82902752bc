use std::sync::LazyLock;

use axum::{Json, extract::rejection::JsonRejection};
use regex::Regex;

use crate::error::AppError;

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_]+").unwrap());
static INVALID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9-]").unwrap());
static DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").unwrap());

/// Category keys are lowercase slugs: "Outdoor Benches" and "outdoor_benches"
/// both become "outdoor-benches".
pub fn sanitize(input: &str) -> String {
    let lowered = input.trim().to_lowercase();

    let s = SEPARATORS.replace_all(&lowered, "-");
    let s = INVALID.replace_all(&s, "");
    let s = DASHES.replace_all(&s, "-");

    s.trim_matches('-').to_string()
}

pub fn normalize_category(raw: &str) -> Result<String, AppError> {
    let category_id = sanitize(raw);

    if category_id.is_empty() {
        return Err(AppError::InvalidCategory(raw.to_string()));
    }

    Ok(category_id)
}

/// Highest order the API accepts. Repairs count upward from existing orders,
/// so stored values stay far below `i64::MAX`.
pub const MAX_DISPLAY_ORDER: i64 = i32::MAX as i64;

/// Orders written through the API must be in `1..=MAX_DISPLAY_ORDER`; `None` clears.
pub fn validate_order(display_order: Option<i64>) -> Result<Option<i64>, AppError> {
    match display_order {
        Some(order) if !(1..=MAX_DISPLAY_ORDER).contains(&order) => Err(AppError::InvalidOrder(order)),
        other => Ok(other),
    }
}

pub fn parse_payload<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|rejection| AppError::MalformedPayload(rejection.body_text()))
}
