//! HTTP handlers for quotation endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{Map, Value};

use shared::models::{Action, Resource};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::quotations::{
    CreateQuotationInput, QuotationFilter, QuotationService, UpdateQuotationStatusInput,
};
use crate::AppState;

use super::envelope;

/// List quotations, optionally filtered by status or customer
pub async fn list_quotations(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(filter): Query<QuotationFilter>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Quotations, Action::View)?;
    let service = QuotationService::new(state.store.clone());
    let quotations = service.list(filter).await?;
    envelope("quotations", quotations)
}

/// Get one quotation by id
pub async fn get_quotation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Quotations, Action::View)?;
    let service = QuotationService::new(state.store.clone());
    let quotation = service.get(&id).await?;
    envelope("quotation", quotation)
}

/// Create a quotation
pub async fn create_quotation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateQuotationInput>,
) -> AppResult<impl IntoResponse> {
    current_user.0.require(Resource::Quotations, Action::Create)?;
    let service = QuotationService::new(state.store.clone());
    let quotation = service.create(input).await?;
    Ok((StatusCode::CREATED, envelope("quotation", quotation)?))
}

/// Approve or reject a pending quotation
pub async fn update_quotation_status(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<UpdateQuotationStatusInput>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Quotations, Action::Edit)?;
    let service = QuotationService::new(state.store.clone());
    let quotation = service.update_status(&id, input).await?;
    envelope("quotation", quotation)
}

/// Convert an approved quotation into an order
pub async fn convert_quotation(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Quotations, Action::Edit)?;
    let service = QuotationService::new(state.store.clone());
    let (quotation, order) = service.convert_to_order(&id).await?;

    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(
        "message".to_string(),
        Value::String("Quotation converted to order successfully".to_string()),
    );
    body.insert(
        "quotation".to_string(),
        serde_json::to_value(quotation).map_err(|e| AppError::Internal(e.to_string()))?,
    );
    body.insert(
        "order".to_string(),
        serde_json::to_value(order).map_err(|e| AppError::Internal(e.to_string()))?,
    );
    Ok(Json(Value::Object(body)))
}
