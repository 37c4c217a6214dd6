//! HTTP handlers for warehouse fulfillment endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use shared::models::{Action, Resource};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::warehouse::{
    PickInput, PickListFilter, ReceiveInboundInput, ShipDispatchInput, WarehouseService,
};
use crate::AppState;

use super::envelope;

/// Inbound shipment queue
pub async fn list_inbound(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Warehouse, Action::View)?;
    let service = WarehouseService::new(state.store.clone());
    let inbound = service.list_inbound().await?;
    envelope("inboundGoods", inbound)
}

/// Receive an inbound shipment into stock
pub async fn receive_inbound(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<ReceiveInboundInput>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Warehouse, Action::Edit)?;
    let service = WarehouseService::new(state.store.clone());
    let inbound = service.receive_inbound(&id, input).await?;
    envelope("inbound", inbound)
}

/// Pick lists, optionally filtered by status
pub async fn list_pick_lists(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(filter): Query<PickListFilter>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Warehouse, Action::View)?;
    let service = WarehouseService::new(state.store.clone());
    let pick_lists = service.list_pick_lists(filter).await?;
    envelope("pickLists", pick_lists)
}

/// Record picking progress
pub async fn pick_items(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<PickInput>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Warehouse, Action::Edit)?;
    let service = WarehouseService::new(state.store.clone());
    let pick_list = service.pick(&id, input).await?;
    envelope("pickList", pick_list)
}

/// Dispatch queue
pub async fn list_dispatch(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Warehouse, Action::View)?;
    let service = WarehouseService::new(state.store.clone());
    let dispatch = service.list_dispatch().await?;
    envelope("dispatchQueue", dispatch)
}

/// Confirm a shipment
pub async fn ship_dispatch(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<ShipDispatchInput>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Warehouse, Action::Edit)?;
    let service = WarehouseService::new(state.store.clone());
    let dispatch = service.ship_dispatch(&id, input).await?;
    envelope("dispatch", dispatch)
}
