// handlers/public/authentications.rs - /authentications session endpoints

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};

use crate::entities::NewAuthentication;
use crate::handlers::json_body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::server::AppState;

/// POST /authentications - log in, returns access and refresh tokens
pub async fn post_authentication(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<NewAuthentication> {
    let payload = json_body(payload)?;
    let tokens = state.authentications.login(&payload).await?;

    Ok(ApiResponse::created(tokens))
}

/// PUT /authentications - trade a refresh token for a new access token
pub async fn put_authentication(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let payload = json_body(payload)?;
    let access_token = state.authentications.refresh(&payload).await?;

    Ok(ApiResponse::success(json!({ "accessToken": access_token })))
}

/// DELETE /authentications - revoke a refresh token
pub async fn delete_authentication(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<()> {
    let payload = json_body(payload)?;
    state.authentications.logout(&payload).await?;

    Ok(ApiResponse::ok().with_message("refresh token deleted"))
}
