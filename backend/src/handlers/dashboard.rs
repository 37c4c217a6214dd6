//! HTTP handlers for dashboard endpoints

use axum::{extract::State, Json};
use serde_json::Value;

use shared::models::{Action, Resource};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::dashboard::DashboardService;
use crate::AppState;

use super::envelope;

/// Headline figures for the dashboard landing page
pub async fn dashboard_overview(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Dashboard, Action::View)?;
    let service = DashboardService::new(state.store.clone());
    let overview = service.overview().await?;
    envelope("overview", overview)
}

/// Per-warehouse stock roll-up
pub async fn dashboard_stock_levels(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Dashboard, Action::View)?;
    let service = DashboardService::new(state.store.clone());
    let stock_levels = service.stock_levels().await?;
    envelope("stockLevels", stock_levels)
}

/// Revenue and quotation conversion figures
pub async fn dashboard_sales_metrics(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Dashboard, Action::View)?;
    let service = DashboardService::new(state.store.clone());
    let sales_metrics = service.sales_metrics().await?;
    envelope("salesMetrics", sales_metrics)
}

/// Fulfillment pipeline figures
pub async fn dashboard_warehouse_metrics(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Dashboard, Action::View)?;
    let service = DashboardService::new(state.store.clone());
    let warehouse_metrics = service.warehouse_metrics().await?;
    envelope("warehouseMetrics", warehouse_metrics)
}

/// Low-stock and expired-quotation alerts
pub async fn dashboard_inventory_alerts(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Dashboard, Action::View)?;
    let service = DashboardService::new(state.store.clone());
    let alerts = service.inventory_alerts().await?;
    envelope("alerts", alerts)
}
