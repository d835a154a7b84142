use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Wrapper for API responses that adds the `{"status":"success"}` envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub message: Option<String>,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK with `data`
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            message: None,
            status_code: StatusCode::OK,
        }
    }

    /// 201 Created with `data`
    pub fn created(data: T) -> Self {
        Self {
            data: Some(data),
            message: None,
            status_code: StatusCode::CREATED,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// 200 OK carrying only the status
    pub fn ok() -> Self {
        Self {
            data: None,
            message: None,
            status_code: StatusCode::OK,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut envelope = Map::new();
        envelope.insert("status".into(), json!("success"));

        if let Some(message) = self.message {
            envelope.insert("message".into(), json!(message));
        }

        if let Some(data) = self.data {
            match serde_json::to_value(&data) {
                Ok(value) => {
                    envelope.insert("data".into(), value);
                }
                Err(e) => {
                    tracing::error!("Failed to serialize response data: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "status": "error",
                            "message": "internal server error"
                        })),
                    )
                        .into_response();
                }
            }
        }

        (self.status_code, Json(Value::Object(envelope))).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn created_wraps_data() {
        let response = ApiResponse::created(json!({ "addedThread": { "id": "thread-1" } })).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({ "status": "success", "data": { "addedThread": { "id": "thread-1" } } })
        );
    }

    #[tokio::test]
    async fn ok_has_status_only() {
        let response = ApiResponse::ok().into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "success" }));
    }

    #[tokio::test]
    async fn message_is_included() {
        let response = ApiResponse::ok().with_message("refresh token deleted").into_response();
        assert_eq!(
            body_json(response).await,
            json!({ "status": "success", "message": "refresh token deleted" })
        );
    }
}
