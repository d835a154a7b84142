// handlers/protected/comments.rs - /threads/:thread_id/comments

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::handlers::json_body;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;

/// POST /threads/:thread_id/comments
pub async fn post_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(thread_id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let payload = json_body(payload)?;
    let added_comment = state.comments.add_comment(&payload, &user.id, &thread_id).await?;

    Ok(ApiResponse::created(json!({ "addedComment": added_comment })))
}

/// DELETE /threads/:thread_id/comments/:comment_id - owner only, soft delete
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((_thread_id, comment_id)): Path<(String, String)>,
) -> ApiResult<()> {
    state.comments.delete_comment(&comment_id, &user.id).await?;

    Ok(ApiResponse::ok())
}

/// PUT /threads/:thread_id/comments/:comment_id/likes - like or unlike
pub async fn put_comment_like(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((thread_id, comment_id)): Path<(String, String)>,
) -> ApiResult<()> {
    state.comments.toggle_like(&thread_id, &comment_id, &user.id).await?;

    Ok(ApiResponse::ok())
}
