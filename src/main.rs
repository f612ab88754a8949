use dental_careers_backend::app::app::App;
use dental_careers_backend::config::log_conf::LogConfig;
use dental_careers_backend::util::logger::Logger;
use dotenv::dotenv;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Load .env before the logger so LOG_DIR and friends are honoured
    let dotenv_result = dotenv();

    let _logger = match Logger::new(&LogConfig::from_env()) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    info!("🚀 Starting dental careers backend");

    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new().await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.start().await {
        error!("Server terminated with error: {}", e);
        std::process::exit(1);
    }
}
