//! HTTP handlers for order endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use shared::models::{Action, Resource};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::orders::{CreateOrderInput, OrderFilter, OrderService, UpdateOrderStatusInput};
use crate::AppState;

use super::{envelope, envelope_with_message};

/// List orders, optionally filtered by status or customer
pub async fn list_orders(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(filter): Query<OrderFilter>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Orders, Action::View)?;
    let service = OrderService::new(state.store.clone());
    let orders = service.list(filter).await?;
    envelope("orders", orders)
}

/// Get one order by id
pub async fn get_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Orders, Action::View)?;
    let service = OrderService::new(state.store.clone());
    let order = service.get(&id).await?;
    envelope("order", order)
}

/// Create an order, reserving stock for every line
pub async fn create_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<impl IntoResponse> {
    current_user.0.require(Resource::Orders, Action::Create)?;
    let service = OrderService::new(state.store.clone());
    let order = service.create(input).await?;
    Ok((StatusCode::CREATED, envelope("order", order)?))
}

/// Advance an order through its lifecycle
pub async fn update_order_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<UpdateOrderStatusInput>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Orders, Action::Edit)?;
    let service = OrderService::new(state.store.clone());
    let order = service.update_status(&id, input).await?;
    envelope("order", order)
}

/// Cancel a pre-shipment order, releasing its reservations
pub async fn cancel_order(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Orders, Action::Delete)?;
    let service = OrderService::new(state.store.clone());
    let order = service.cancel(&id).await?;
    envelope_with_message("Order cancelled successfully", "order", order)
}
