//! HTTP handlers for customer endpoints

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
use crate::services::customers::{
    CreateCustomerInput, CustomerFilter, CustomerService, UpdateCustomerInput,
};
use crate::AppState;

use super::envelope;

/// List customers, optionally filtered by status
pub async fn list_customers(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(filter): Query<CustomerFilter>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Customers, Action::View)?;
    let service = CustomerService::new(state.store.clone());
    let customers = service.list(filter).await?;
    envelope("customers", customers)
}

/// Get one customer by id
pub async fn get_customer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Customers, Action::View)?;
    let service = CustomerService::new(state.store.clone());
    let customer = service.get(&id).await?;
    envelope("customer", customer)
}

/// Create a customer account
pub async fn create_customer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateCustomerInput>,
) -> AppResult<impl IntoResponse> {
    current_user.0.require(Resource::Customers, Action::Create)?;
    let service = CustomerService::new(state.store.clone());
    let customer = service.create(input).await?;
    Ok((StatusCode::CREATED, envelope("customer", customer)?))
}

/// Update a customer account
pub async fn update_customer(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<UpdateCustomerInput>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Customers, Action::Edit)?;
    let service = CustomerService::new(state.store.clone());
    let customer = service.update(&id, input).await?;
    envelope("customer", customer)
}

/// Orders placed by a customer
pub async fn customer_orders(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Customers, Action::View)?;
    let service = CustomerService::new(state.store.clone());
    let orders = service.orders(&id).await?;
    envelope("orders", orders)
}

/// Quotations issued to a customer
pub async fn customer_quotations(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    current_user.0.require(Resource::Customers, Action::View)?;
    let service = CustomerService::new(state.store.clone());
    let quotations = service.quotations(&id).await?;
    envelope("quotations", quotations)
}
