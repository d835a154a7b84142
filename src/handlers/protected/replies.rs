// handlers/protected/replies.rs - /threads/:thread_id/comments/:comment_id/replies

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::handlers::json_body;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::server::AppState;

pub async fn post_reply(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((thread_id, comment_id)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let payload = json_body(payload)?;
    let added_reply = state
        .replies
        .add_reply(&payload, &user.id, &thread_id, &comment_id)
        .await?;

    Ok(ApiResponse::created(json!({ "addedReply": added_reply })))
}

/// DELETE .../replies/:reply_id - owner only, soft delete
pub async fn delete_reply(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((_thread_id, _comment_id, reply_id)): Path<(String, String, String)>,
) -> ApiResult<()> {
    state.replies.delete_reply(&reply_id, &user.id).await?;

    Ok(ApiResponse::ok())
}
