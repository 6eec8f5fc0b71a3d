pub mod codes;
pub mod handlers;
pub mod violations;

pub use codes::ErrorCode;
pub use violations::{FieldViolation, flatten};

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Status message sent with every validation failure.
pub const VALIDATION_STATUS_MESSAGE: &str = "Unprocessable entity";

/// Standard error response structure.
///
/// Every error response carries the numeric status, a short status message,
/// a human-readable message and optional structured data.
///
/// # JSON Example
///
/// ```json
/// {
///   "statusCode": 422,
///   "statusMessage": "Unprocessable entity",
///   "message": "The provided data was incomplete or invalid.",
///   "data": [{ "type": "invalid_type", "path": ["neo4j", "url"], "message": "Required" }]
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body
    pub status_code: u16,
    /// Short status description
    pub status_message: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., field violations)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            status_message: status.canonical_reason().unwrap_or("Error").to_string(),
            message: message.into(),
            data: None,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// 400 with a custom status message and a structured payload
    #[error("{status_message}: {message}")]
    BadRequestWithData {
        code: ErrorCode,
        status_message: String,
        message: String,
        data: serde_json::Value,
    },

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {}",
                    e
                );
                let status = e.status();
                (status, ErrorResponse::new(status, e.body_text()))
            }
            AppError::ValidationError(e) => {
                let violations = flatten(&e);
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    violations = violations.len(),
                    "Validation error"
                );
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                let data = serde_json::to_value(&violations).unwrap_or(serde_json::Value::Null);
                (
                    status,
                    ErrorResponse {
                        status_code: status.as_u16(),
                        status_message: VALIDATION_STATUS_MESSAGE.to_string(),
                        message: ErrorCode::ValidationError.default_message().to_string(),
                        data: Some(data),
                    },
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", msg);
                let status = StatusCode::BAD_REQUEST;
                (status, ErrorResponse::new(status, msg))
            }
            AppError::BadRequestWithData {
                code,
                status_message,
                message,
                data,
            } => {
                tracing::info!(
                    error_code = code.code(),
                    data = %data,
                    "{}: {}",
                    status_message,
                    message
                );
                let status = StatusCode::BAD_REQUEST;
                (
                    status,
                    ErrorResponse {
                        status_code: status.as_u16(),
                        status_message,
                        message,
                        data: Some(data),
                    },
                )
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                let status = StatusCode::NOT_FOUND;
                (status, ErrorResponse::new(status, msg))
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (
                    status,
                    ErrorResponse::new(status, ErrorCode::InternalError.default_message()),
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::ServiceUnavailable.code(),
                    "Service unavailable: {}",
                    msg
                );
                let status = StatusCode::SERVICE_UNAVAILABLE;
                (status, ErrorResponse::new(status, msg))
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_with_data_envelope() {
        let error = AppError::BadRequestWithData {
            code: ErrorCode::ConnectionFailure,
            status_message: "Connection failure".into(),
            message: "One or more connections could not be established.".into(),
            data: json!({"mongoConnected": false, "neo4jConnected": true}),
        };

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "statusCode": 400,
                "statusMessage": "Connection failure",
                "message": "One or more connections could not be established.",
                "data": {"mongoConnected": false, "neo4jConnected": true}
            })
        );
    }

    #[tokio::test]
    async fn test_validation_error_is_422_with_violations() {
        let mut errors = ValidationErrors::new();
        let mut error = validator::ValidationError::new("invalid_type");
        error.message = Some("Required".into());
        errors.add("url", error);

        let response = AppError::ValidationError(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["statusCode"], 422);
        assert_eq!(body["statusMessage"], "Unprocessable entity");
        assert_eq!(body["message"], "The provided data was incomplete or invalid.");
        assert_eq!(
            body["data"],
            json!([{"type": "invalid_type", "path": ["url"], "message": "Required"}])
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::InternalServerError("pool exploded".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["statusMessage"], "Internal Server Error");
        assert!(!body.to_string().contains("pool exploded"));
        assert!(body.get("data").is_none());
    }
}
