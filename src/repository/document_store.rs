use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Database};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use crate::config::mongo_conf::MongoConfig;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};

/// Collections listed by [`DocumentStore::status`] are capped to this many names.
pub const STATUS_COLLECTION_LIMIT: usize = 10;

/// Snapshot of the store used by the diagnostics endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub database_name: String,
    pub collections: Vec<String>,
}

/// Insert-only persistence of schema-flexible documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `document` as a new document of `collection` and return its
    /// store-generated id. Never updates an existing document.
    async fn insert(&self, collection: &str, document: Document) -> RepositoryResult<String>;

    /// Round-trip to the store to confirm the connection is live.
    async fn ping(&self) -> RepositoryResult<()>;

    async fn status(&self) -> RepositoryResult<StoreStatus>;
}

/// MongoDB-backed store. The client lives until [`MongoDocumentStore::shutdown`];
/// every call afterwards fails as unavailable.
pub struct MongoDocumentStore {
    client: RwLock<Option<Client>>,
    database_name: String,
}

impl MongoDocumentStore {
    /// Build the client from `config` and probe the server once. An unreachable
    /// server is logged, not fatal; the driver keeps trying to reconnect.
    pub async fn connect(config: &MongoConfig) -> RepositoryResult<Self> {
        info!(database = %config.database, "Connecting to MongoDB");
        let timeout = std::time::Duration::from_secs(config.connection_timeout_secs);

        let mut client_options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            error!("Failed to parse MongoDB URI: {}", e);
            RepositoryError::unavailable(format!("Invalid MongoDB URI: {}", e))
        })?;
        client_options.app_name = Some("DentalCareersBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout = Some(timeout);
        client_options.server_selection_timeout = Some(timeout);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            client_options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .build(),
            );
        }

        let client = Client::with_options(client_options).map_err(|e| {
            error!("Failed to create MongoDB client: {}", e);
            RepositoryError::unavailable(format!("Client creation failed: {}", e))
        })?;

        let store = MongoDocumentStore {
            client: RwLock::new(Some(client)),
            database_name: config.database.clone(),
        };

        match store.ping().await {
            Ok(()) => info!("MongoDB connection established"),
            Err(e) => warn!("MongoDB not reachable at startup: {}", e),
        }
        Ok(store)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Close the client. Idempotent.
    pub async fn shutdown(&self) {
        let client = self.client.write().await.take();
        if let Some(client) = client {
            info!("Closing MongoDB connection");
            client.shutdown().await;
        }
    }

    async fn live_database(&self) -> RepositoryResult<Database> {
        match self.client.read().await.as_ref() {
            Some(client) => Ok(client.database(&self.database_name)),
            None => Err(RepositoryError::unavailable("store connection has been shut down")),
        }
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    #[instrument(skip(self, document), fields(collection = %collection))]
    async fn insert(&self, collection: &str, mut document: Document) -> RepositoryResult<String> {
        let db = self.live_database().await?;
        let id = ObjectId::new();
        document.insert("_id", id);

        match db.collection::<Document>(collection).insert_one(document, None).await {
            Ok(_) => {
                info!(id = %id, "Document inserted");
                Ok(id.to_hex())
            }
            Err(e) => {
                error!("Failed to insert document: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepositoryResult<()> {
        let db = self.live_database().await?;
        db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn status(&self) -> RepositoryResult<StoreStatus> {
        let db = self.live_database().await?;
        let mut collections = db.list_collection_names(None).await?;
        collections.truncate(STATUS_COLLECTION_LIMIT);
        Ok(StoreStatus {
            database_name: self.database_name.clone(),
            collections,
        })
    }
}
