use dental_careers_backend::config::mongo_conf::MongoConfig;
use dental_careers_backend::repository::document_store::{DocumentStore, MongoDocumentStore};
use dental_careers_backend::repository::repository_error::RepositoryError;
use bson::doc;

async fn setup_store() -> MongoDocumentStore {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();
    let config = MongoConfig::from_env().unwrap_or_else(|_| MongoConfig::from_test_env());
    MongoDocumentStore::connect(&config).await.expect("Failed to build MongoDocumentStore")
}

#[tokio::test]
#[ignore = "requires a running MongoDB server"]
async fn test_mongo_store_workflow() {
    let store = setup_store().await;
    store.ping().await.expect("MongoDB should be reachable");

    let document = doc! { "submissionKind": "express", "email": "anna@example.com" };
    let first = store.insert("application_test", document.clone()).await.expect("insert failed");
    let second = store.insert("application_test", document).await.expect("insert failed");
    assert_ne!(first, second);
    assert_eq!(first.len(), 24);

    let status = store.status().await.expect("status failed");
    assert_eq!(status.database_name, store.database_name());
    assert!(status.collections.iter().any(|c| c == "application_test"));

    store.shutdown().await;
    let err = store.insert("application_test", doc! {}).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Unavailable(_)));
}
