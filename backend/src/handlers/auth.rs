//! HTTP handlers for authentication endpoints

use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::auth::{AuthService, LoginInput};
use crate::AppState;

use super::envelope;

/// Authenticate and issue a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<Json<Value>> {
    let service = AuthService::new(state.store.clone(), &state.config);
    let response = service.login(input).await?;
    envelope("auth", response)
}

/// Current authenticated user
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Value>> {
    let service = AuthService::new(state.store.clone(), &state.config);
    let user = service.me(current_user.0.user_id).await?;
    envelope("user", user)
}
