use axum::{http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;

use crate::service::ServiceError;

#[derive(Debug, Serialize)]
pub enum HandlerErrorKind {
    Validation,
    BadRequest,
    PayloadTooLarge,
    StorageUnavailable,
    Internal,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::PayloadTooLarge => "PayloadTooLarge",
            HandlerErrorKind::StorageUnavailable => "StorageUnavailable",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Serialize)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl HandlerError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        HandlerError {
            error: HandlerErrorKind::BadRequest,
            message: message.into(),
            details: None,
        }
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        HandlerError {
            error: HandlerErrorKind::PayloadTooLarge,
            message: message.into(),
            details: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            HandlerErrorKind::Validation | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            HandlerErrorKind::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, axum::Json(self)).into_response()
    }
}

// Store failure details stay in the logs, not in the response
impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(validation) => HandlerError {
                error: HandlerErrorKind::Validation,
                message: validation.to_string(),
                details: serde_json::to_value(&validation.errors).ok(),
            },
            ServiceError::StorageUnavailable(_) => HandlerError {
                error: HandlerErrorKind::StorageUnavailable,
                message: "Application store is currently unavailable".to_string(),
                details: None,
            },
            ServiceError::StorageWrite(_) => HandlerError {
                error: HandlerErrorKind::Internal,
                message: "Failed to store application".to_string(),
                details: None,
            },
        }
    }
}
