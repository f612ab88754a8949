use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::dto::application_dto::StandardSubmission;
use crate::intake::IntakeValidator;
use crate::model::application::ApplicationRecord;
use crate::repository::document_store::DocumentStore;
use crate::repository::repository_error::RepositoryError;
use crate::service::ServiceError;

/// Logical collection holding every submitted application.
pub const APPLICATION_COLLECTION: &str = "application";

#[async_trait]
pub trait ApplicationService: Send + Sync {
    /// Validate and store an express submission, returning the new document id.
    async fn submit_express(&self, payload: Value) -> Result<String, ServiceError>;

    /// Validate, inline attachments, and store a standard submission.
    async fn submit_standard(&self, submission: StandardSubmission) -> Result<String, ServiceError>;
}

pub struct ApplicationServiceImpl {
    pub store: Arc<dyn DocumentStore>,
    pub validator: IntakeValidator,
}

impl ApplicationServiceImpl {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        ApplicationServiceImpl { store, validator: IntakeValidator }
    }

    async fn persist(&self, record: &ApplicationRecord) -> Result<String, ServiceError> {
        let document = bson::to_document(record).map_err(|e| {
            error!("Failed to encode application: {}", e);
            ServiceError::from(RepositoryError::from(e))
        })?;

        match self.store.insert(APPLICATION_COLLECTION, document).await {
            Ok(id) => {
                info!(id = %id, kind = ?record.submission_kind(), "Application stored");
                Ok(id)
            }
            Err(e) => {
                error!("Failed to store application: {e}");
                Err(ServiceError::from(e))
            }
        }
    }
}

#[async_trait]
impl ApplicationService for ApplicationServiceImpl {
    #[instrument(skip_all)]
    async fn submit_express(&self, payload: Value) -> Result<String, ServiceError> {
        info!("Received express application");
        let record = self.validator.validate_express(payload).map_err(|e| {
            warn!("Express application rejected: {e}");
            ServiceError::Validation(e)
        })?;
        self.persist(&record).await
    }

    #[instrument(skip_all, fields(files = submission.files.len()))]
    async fn submit_standard(&self, submission: StandardSubmission) -> Result<String, ServiceError> {
        info!("Received standard application");
        let record = self.validator.validate_standard(submission).map_err(|e| {
            warn!("Standard application rejected: {e}");
            ServiceError::Validation(e)
        })?;
        self.persist(&record).await
    }
}
