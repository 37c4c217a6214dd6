//! HTTP handlers for the VENUS API
//!
//! Every success response is wrapped as `{ "success": true, "<entity>": … }`
//! to match the envelope the dashboard frontend consumes.

mod auth;
mod customers;
mod dashboard;
mod health;
mod inventory;
mod orders;
mod quotations;
mod warehouse;

pub use auth::*;
pub use customers::*;
pub use dashboard::*;
pub use health::*;
pub use inventory::*;
pub use orders::*;
pub use quotations::*;
pub use warehouse::*;

use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// `{ "success": true, "<key>": <value> }`
pub(crate) fn envelope<T: Serialize>(key: &str, value: T) -> AppResult<Json<Value>> {
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(
        key.to_string(),
        serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))?,
    );
    Ok(Json(Value::Object(body)))
}

/// Envelope with a human-readable message alongside the entity
pub(crate) fn envelope_with_message<T: Serialize>(
    message: &str,
    key: &str,
    value: T,
) -> AppResult<Json<Value>> {
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert("message".to_string(), Value::String(message.to_string()));
    body.insert(
        key.to_string(),
        serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))?,
    );
    Ok(Json(Value::Object(body)))
}
