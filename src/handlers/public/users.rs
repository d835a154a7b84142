// handlers/public/users.rs - POST /users

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};

use crate::handlers::json_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

/// POST /users - register an account, returns `addedUser`
pub async fn post_user(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let payload = json_body(payload)?;
    let added_user = state.users.register_user(&payload).await?;

    Ok(ApiResponse::created(json!({ "addedUser": added_user })))
}
