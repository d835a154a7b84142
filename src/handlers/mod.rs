// handlers/mod.rs - Handlers grouped by security tier
//
// Public (no auth) → Protected (JWT auth). Handlers only translate HTTP into
// service calls; every rule lives in the services.

pub mod protected;
pub mod public;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

use crate::error::ApiError;

/// Unwraps a JSON body, turning axum's rejection into a 400 fail envelope.
pub(crate) fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::not_found("route not found")
}
