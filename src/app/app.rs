use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::{AppConfig, MongoConfig};
use crate::repository::document_store::{DocumentStore, MongoDocumentStore};
use crate::router::application_router::application_router;
use crate::router::health_router::health_router;
use crate::service::application_service::ApplicationServiceImpl;

pub struct App {
    config: AppConfig,
    router: Router,
    store: Arc<MongoDocumentStore>,
}

impl App {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env()?;
        let mongo_config = MongoConfig::from_env()?;

        let store = Arc::new(MongoDocumentStore::connect(&mongo_config).await?);
        info!("Using MongoDB database: {}", store.database_name());
        let router = create_router(store.clone(), &config);

        Ok(App { config, router, store })
    }

    /// Serve until Ctrl+C or SIGTERM, then close the store connection.
    pub async fn start(self) -> std::io::Result<()> {
        let host = self.config.host.parse::<std::net::IpAddr>().map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("Invalid host {}: {}", self.config.host, e))
        })?;
        let addr = SocketAddr::new(host, self.config.port);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("🚀 Server running at http://{}", addr);

        let served = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        self.store.shutdown().await;
        info!("Server stopped");
        served
    }
}

/// Full route table over any [`DocumentStore`], with permissive CORS.
pub fn create_router(store: Arc<dyn DocumentStore>, config: &AppConfig) -> Router {
    let application_service = Arc::new(ApplicationServiceImpl::new(store.clone()));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(application_router(application_service, config.max_body_bytes))
        .merge(health_router(store))
        .layer(cors)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    warn!("Shutdown signal received, initiating graceful shutdown...");
}
