use std::sync::Arc;

use dental_careers_backend::dto::application_dto::StandardSubmission;
use dental_careers_backend::model::application::{ApplicationRecord, SubmissionKind};
use dental_careers_backend::repository::memory_store::InMemoryDocumentStore;
use dental_careers_backend::service::application_service::{
    ApplicationService, ApplicationServiceImpl, APPLICATION_COLLECTION,
};
use dental_careers_backend::service::ServiceError;
use dental_careers_backend::util::inline::INLINE_LIMIT_BYTES;
use serde_json::json;

/// Initialize tracing for tests
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

fn setup_service() -> (InMemoryDocumentStore, ApplicationServiceImpl) {
    init_tracing();
    let store = InMemoryDocumentStore::new();
    let service = ApplicationServiceImpl::new(Arc::new(store.clone()));
    (store, service)
}

fn anna_submission() -> StandardSubmission {
    StandardSubmission::default()
        .with_field("firstName", "Anna")
        .with_field("lastName", "Muller")
        .with_field("email", "anna@example.com")
        .with_field("desiredRole", "Dental assistant")
        .with_field("workSchedule", "Teilzeit")
}

#[tokio::test]
async fn test_express_record_is_persisted_verbatim() {
    let (store, service) = setup_service();

    let id = service
        .submit_express(json!({
            "firstName": "Anna",
            "lastName": "Muller",
            "email": "anna@example.com",
            "phone": "+49 30 1234567",
            "message": "Ich freue mich auf Ihre Antwort."
        }))
        .await
        .expect("express submission should be stored");

    let document = store.find_by_id(APPLICATION_COLLECTION, &id).await.unwrap();
    let record: ApplicationRecord = bson::from_document(document).unwrap();
    assert_eq!(record.submission_kind(), SubmissionKind::Express);
    assert_eq!(record.first_name(), "Anna");
    assert_eq!(record.phone(), Some("+49 30 1234567"));
    assert_eq!(record.message(), Some("Ich freue mich auf Ihre Antwort."));
    assert!(record.attachments().is_none());
}

#[tokio::test]
async fn test_standard_record_mixes_inline_and_metadata_only_files() {
    let (store, service) = setup_service();
    let submission = anna_submission()
        .with_file("cv.pdf", Some("application/pdf"), vec![1u8; INLINE_LIMIT_BYTES])
        .with_file("portfolio.zip", None, vec![2u8; INLINE_LIMIT_BYTES + 1]);

    let id = service.submit_standard(submission).await.unwrap();

    let document = store.find_by_id(APPLICATION_COLLECTION, &id).await.unwrap();
    let record: ApplicationRecord = bson::from_document(document).unwrap();
    assert_eq!(record.desired_role(), Some("Dental assistant"));
    assert_eq!(record.work_schedule(), Some("Teilzeit"));
    let attachments = record.attachments().unwrap();
    assert_eq!(attachments.len(), 2);
    assert!(attachments[0].inline_content().is_some());
    assert_eq!(attachments[1].size_bytes(), (INLINE_LIMIT_BYTES + 1) as u64);
    assert!(attachments[1].content_type().is_none());
    assert!(attachments[1].inline_content().is_none());
}

#[tokio::test]
async fn test_validation_failure_writes_nothing() {
    let (store, service) = setup_service();
    let submission = StandardSubmission::default()
        .with_field("firstName", "Anna")
        .with_field("lastName", "Muller")
        .with_field("email", "anna.example.com")
        .with_file("cv.pdf", Some("application/pdf"), vec![1u8; 16]);

    let err = service.submit_standard(submission).await.unwrap_err();

    match err {
        ServiceError::Validation(validation) => assert!(validation.has_field("email")),
        other => panic!("expected a validation error, got {other}"),
    }
    assert!(store.documents(APPLICATION_COLLECTION).await.is_empty());
}

#[tokio::test]
async fn test_store_errors_are_not_retried() {
    let (store, service) = setup_service();
    let payload = json!({ "firstName": "Anna", "lastName": "Muller", "email": "anna@example.com" });

    store.set_offline(true);
    let err = service.submit_express(payload.clone()).await.unwrap_err();
    assert!(matches!(err, ServiceError::StorageUnavailable(_)));

    store.set_offline(false);
    store.set_reject_writes(true);
    let err = service.submit_express(payload).await.unwrap_err();
    assert!(matches!(err, ServiceError::StorageWrite(_)));

    assert!(store.documents(APPLICATION_COLLECTION).await.is_empty());
}
