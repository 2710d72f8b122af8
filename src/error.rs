use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::schema::SchemaValidationError;
use crate::upstream::{translate, FetchError, UpstreamError};

/// Standard error response format for all locally generated API errors
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// A problem with a single request field
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            details: None,
        }
    }

    pub fn with_code(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
            details: None,
        }
    }
}

/// Trait for errors that can be converted to HTTP responses
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Optional error code for programmatic handling (e.g., "VALIDATION_ERROR")
    fn error_code(&self) -> Option<&'static str> {
        None
    }

    /// Field-level details, for errors caused by request input
    fn details(&self) -> Option<Vec<FieldError>> {
        None
    }
}

/// Convert any HttpError into an Axum response
pub fn into_response<E: HttpError>(err: E) -> Response {
    let status = err.status_code();
    let code = err.error_code();
    let message = err.to_string();

    if status.is_server_error() {
        tracing::error!(error = %message, status = %status, code = ?code, "API error");
    } else {
        tracing::warn!(error = %message, status = %status, code = ?code, "API error");
    }

    let mut body = match code {
        Some(code) => ErrorResponse::with_code(message, code),
        None => ErrorResponse::new(message),
    };
    body.details = err.details();

    (status, Json(body)).into_response()
}

/// Macro to implement IntoResponse for HttpError types
#[macro_export]
macro_rules! impl_into_response {
    ($error_type:ty) => {
        impl axum::response::IntoResponse for $error_type {
            fn into_response(self) -> axum::response::Response {
                $crate::error::into_response(self)
            }
        }
    };
}

/// Failures on the path from a validated request to the upstream and back
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Upstream responded with HTTP {}", .0.status)]
    Upstream(UpstreamError),

    #[error("Upstream is unreachable: {0}")]
    Unavailable(#[source] reqwest::Error),

    #[error("Upstream returned a body that is not JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error(transparent)]
    InvalidResponse(#[from] SchemaValidationError),
}

impl From<FetchError> for GatewayError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Status(upstream) => Self::Upstream(upstream),
            FetchError::Transport(source) => Self::Unavailable(source),
            FetchError::MalformedBody(source) => Self::MalformedBody(source),
        }
    }
}

impl HttpError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream(upstream) => upstream.status,
            Self::Unavailable(source) if source.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::MalformedBody(_) | Self::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Upstream(_) => None,
            Self::Unavailable(source) if source.is_timeout() => Some("UPSTREAM_TIMEOUT"),
            Self::Unavailable(_) => Some("UPSTREAM_UNAVAILABLE"),
            Self::MalformedBody(_) | Self::InvalidResponse(_) => {
                Some("INVALID_UPSTREAM_RESPONSE")
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            // Upstream failures keep the provider's status; the body goes under `detail`
            Self::Upstream(upstream) => {
                tracing::warn!(status = %upstream.status, "Upstream rejected request");
                translate(upstream).into_response()
            }
            other => into_response(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_error_response_omits_empty_fields() {
        let body = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
        assert_eq!(body, json!({ "error": "boom" }));
    }

    #[tokio::test]
    async fn test_upstream_error_keeps_status_and_translates_body() {
        let err = GatewayError::Upstream(UpstreamError {
            status: StatusCode::UNAUTHORIZED,
            body: json!({ "cod": 401, "message": "Invalid API key" }),
        });

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["detail"]["cod"], 401);
        assert_eq!(body["detail"]["message"], "Invalid API key");
        assert!(body["detail"]["possible_reason"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_gateway() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let response = GatewayError::MalformedBody(source).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = body_json(response).await;
        assert_eq!(body["code"], "INVALID_UPSTREAM_RESPONSE");
    }
}
