//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use shared::models::{Action, Resource};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::inventory::{
    CreateItemInput, InventoryService, StockMovementInput, UpdateItemInput,
};
use crate::AppState;

use super::{envelope, envelope_with_message};

/// List all items with their stock levels
pub async fn list_items(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Items, Action::View)?;
    let service = InventoryService::new(state.store.clone());
    let items = service.list_items().await?;
    envelope("items", items)
}

/// Get one item by SKU
pub async fn get_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(sku): Path<String>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Items, Action::View)?;
    let service = InventoryService::new(state.store.clone());
    let item = service.get_item(&sku).await?;
    envelope("item", item)
}

/// Create a new item
pub async fn create_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateItemInput>,
) -> AppResult<impl IntoResponse> {
    current_user.0.require(Resource::Items, Action::Create)?;
    let service = InventoryService::new(state.store.clone());
    let item = service.create_item(input).await?;
    Ok((StatusCode::CREATED, envelope("item", item)?))
}

/// Update an item's catalog fields
pub async fn update_item(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(sku): Path<String>,
    Json(input): Json<UpdateItemInput>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Items, Action::Edit)?;
    let service = InventoryService::new(state.store.clone());
    let item = service.update_item(&sku, input).await?;
    envelope("item", item)
}

/// Reserve stock for an order
pub async fn reserve_stock(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<StockMovementInput>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Items, Action::Edit)?;
    let service = InventoryService::new(state.store.clone());
    let item = service.reserve(input).await?;
    envelope_with_message("Stock reserved successfully", "item", item)
}

/// Release previously reserved stock
pub async fn release_stock(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<StockMovementInput>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Items, Action::Edit)?;
    let service = InventoryService::new(state.store.clone());
    let item = service.release(input).await?;
    envelope_with_message("Stock released successfully", "item", item)
}

/// Items at or below their reorder level
pub async fn low_stock_items(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Items, Action::View)?;
    let service = InventoryService::new(state.store.clone());
    let items = service.low_stock().await?;
    envelope("lowStockItems", items)
}
