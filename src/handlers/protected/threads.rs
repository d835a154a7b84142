// handlers/protected/threads.rs - /threads

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::handlers::json_body;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;

/// POST /threads - open a thread owned by the caller
pub async fn post_thread(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let payload = json_body(payload)?;
    let added_thread = state.threads.add_thread(&payload, &user.id).await?;

    Ok(ApiResponse::created(json!({ "addedThread": added_thread })))
}

/// GET /threads/:thread_id - thread with nested comments and replies
pub async fn get_thread(
    State(state): State<AppState>,
    Path(thread_id): Path<String>,
) -> ApiResult<Value> {
    let thread = state.threads.get_thread_detail(&thread_id).await?;

    Ok(ApiResponse::success(json!({ "thread": thread })))
}
