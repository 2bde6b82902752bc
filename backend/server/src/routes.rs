use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::Utc;
use ordering::{
    OrderingSummary, Product, display_sort, plan_duplicate_repair, plan_missing_order_repair,
    summarize,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        AutoOrganizeResponse, CategoryRequest, FixDuplicatesResponse, ListParams, NewProduct,
        OrderUpdate,
    },
    state::AppState,
    utils::{normalize_category, parse_payload, validate_order},
};

pub async fn list_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Product>>, AppError> {
    let category_id = params
        .category_id
        .as_deref()
        .map(normalize_category)
        .transpose()?;

    let mut products = state.store.list(category_id.as_deref()).await?;
    display_sort(&mut products);

    Ok(Json(products))
}

pub async fn summary_handler(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
) -> Result<Json<OrderingSummary>, AppError> {
    let category_id = normalize_category(&category_id)?;
    let products = state.store.list(Some(&category_id)).await?;

    Ok(Json(summarize(&products, &category_id)))
}

pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let new_product = parse_payload(payload)?;

    let id = match new_product.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    };

    let product = Product {
        id,
        category_id: normalize_category(&new_product.category_id)?,
        display_order: validate_order(new_product.display_order)?,
        created_at: Utc::now(),
    };

    state.store.insert(product.clone()).await?;
    info!("Created product {} in {}", product.id, product.category_id);

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn order_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<OrderUpdate>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let update = parse_payload(payload)?;
    let display_order = validate_order(update.display_order)?;

    let product = state.store.set_order(&id, display_order).await?;

    Ok(Json(product))
}

pub async fn auto_organize_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Json<AutoOrganizeResponse>, AppError> {
    let category_id = normalize_category(&parse_payload(payload)?.category_id)?;

    let products = state.store.list(Some(&category_id)).await?;
    let plan = plan_missing_order_repair(&products, &category_id);

    let organized = state.store.apply(&category_id, &plan.instructions).await?;

    if let Some(range) = plan.range {
        info!(
            "Organized {organized} products in {category_id}, orders {}..={}",
            range.start_order, range.end_order
        );
    }

    Ok(Json(AutoOrganizeResponse {
        organized,
        start_order: plan.range.map(|range| range.start_order),
        end_order: plan.range.map(|range| range.end_order),
    }))
}

pub async fn fix_duplicates_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Json<FixDuplicatesResponse>, AppError> {
    let category_id = normalize_category(&parse_payload(payload)?.category_id)?;

    let products = state.store.list(Some(&category_id)).await?;
    let plan = plan_duplicate_repair(&products, &category_id);

    let updated = state.store.apply(&category_id, &plan).await?;
    info!("Renumbered {updated} products in {category_id}");

    Ok(Json(FixDuplicatesResponse { updated }))
}
