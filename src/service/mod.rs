pub mod application_service;

use crate::intake::ValidationError;
use crate::repository::repository_error::RepositoryError;

#[derive(Debug, Clone)]
pub enum ServiceError {
    Validation(ValidationError),
    StorageUnavailable(String),
    StorageWrite(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Validation(err) => write!(f, "Validation Failed: {}", err),
            ServiceError::StorageUnavailable(msg) => write!(f, "Storage Unavailable: {}", msg),
            ServiceError::StorageWrite(msg) => write!(f, "Storage Write Failed: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

// A malformed document is a rejected write as far as callers are concerned
impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Unavailable(msg) => ServiceError::StorageUnavailable(msg),
            RepositoryError::Write(msg) => ServiceError::StorageWrite(msg),
            RepositoryError::SerializationError(msg) => ServiceError::StorageWrite(msg),
        }
    }
}
