use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::server::AppState;

/// GET /health - process liveness plus database connectivity when a pool is attached
pub async fn health(State(state): State<AppState>) -> Response {
    let database = match state.pool.as_ref() {
        None => "none",
        Some(pool) => match DatabaseManager::health_check(pool).await {
            Ok(_) => "ok",
            Err(e) => {
                tracing::error!("Health check failed: {}", e);
                return ApiError::service_unavailable("database unavailable").into_response();
            }
        },
    };

    Json(json!({
        "status": "success",
        "data": { "status": "ok", "timestamp": chrono::Utc::now(), "database": database }
    }))
    .into_response()
}
