// JSON response envelope shared by every endpoint
use crate::application::error::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::any::Any;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            data: None,
            success: false,
            message: Some(message.into()),
            error: Some(code.to_string()),
        }
    }
}

/// Envelope plus the status it is sent with.
pub struct Envelope<T>(pub StatusCode, pub ApiResponse<T>);

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

pub fn ok<T>(data: T, message: &str) -> Envelope<T> {
    Envelope(StatusCode::OK, ApiResponse::success(data, message))
}

pub fn created<T>(data: T, message: &str) -> Envelope<T> {
    Envelope(StatusCode::CREATED, ApiResponse::success(data, message))
}

/// Success without a payload; `data` is sent as `null`.
pub fn done(message: &str) -> Envelope<()> {
    Envelope(
        StatusCode::OK,
        ApiResponse {
            data: None,
            success: true,
            message: Some(message.to_string()),
            error: None,
        },
    )
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        Envelope::<()>(status, ApiResponse::failure(self.code(), self.to_string())).into_response()
    }
}

/// Turn a handler panic into a 500 `INTERNAL_ERROR` envelope.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "handler panicked");
    ServiceError::Internal("Unexpected server error".to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::store::StoreError;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(ServiceError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ServiceError::not_found("x").status(), StatusCode::NOT_FOUND);
        let err = ServiceError::from(StoreError::Unavailable("down".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "PERSISTENCE_ERROR");
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "INTERNAL_ERROR");
        assert_eq!(body["data"], serde_json::Value::Null);
    }

    #[test]
    fn test_failure_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::<()>::failure("NOT_FOUND", "Dashboard not found")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "data": null,
                "success": false,
                "message": "Dashboard not found",
                "error": "NOT_FOUND"
            })
        );
    }
}
