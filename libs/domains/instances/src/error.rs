use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use thiserror::Error;
use validator::ValidationErrors;

use crate::models::ConnectionStatus;

pub const CONNECTION_FAILURE: &str = "Connection failure";
pub const CONNECTION_FAILURE_MESSAGE: &str = "One or more connections could not be established.";

#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("Invalid instance configuration: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(
        "One or more connections could not be established. (mongo: {}, neo4j: {})",
        .0.mongo_connected,
        .0.neo4j_connected
    )]
    ConnectionFailure(ConnectionStatus),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

pub type InstanceResult<T> = Result<T, InstanceError>;

/// Convert InstanceError to AppError for standardized error responses
impl From<InstanceError> for AppError {
    fn from(err: InstanceError) -> Self {
        match err {
            InstanceError::Validation(errors) => AppError::ValidationError(errors),
            InstanceError::ConnectionFailure(status) => AppError::BadRequestWithData {
                code: ErrorCode::ConnectionFailure,
                status_message: CONNECTION_FAILURE.to_string(),
                message: CONNECTION_FAILURE_MESSAGE.to_string(),
                data: serde_json::to_value(status).unwrap_or(serde_json::Value::Null),
            },
            InstanceError::InvalidBody(rejection) => AppError::JsonExtractorRejection(rejection),
        }
    }
}

impl IntoResponse for InstanceError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_connection_failure_maps_to_400() {
        let error = InstanceError::ConnectionFailure(ConnectionStatus {
            mongo_connected: false,
            neo4j_connected: true,
        });
        assert_eq!(
            error.to_string(),
            "One or more connections could not be established. (mongo: false, neo4j: true)"
        );
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_validation_maps_to_422() {
        let error = InstanceError::Validation(ValidationErrors::new());
        assert_eq!(
            error.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
