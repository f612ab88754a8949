use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::{env_var_any, ConfigError};

/// 25 MiB, comfortably above the inline limit so oversized files still reach the inliner.
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a single request body, multipart uploads included
    pub max_body_bytes: usize,
}

impl AppConfig {
    /// Load server configuration from environment variables
    ///
    /// Expected environment variables:
    /// - APP_HOST: bind address (defaults to 0.0.0.0)
    /// - APP_PORT or PORT: listening port (defaults to 8000)
    /// - APP_MAX_BODY_BYTES: request body limit in bytes (defaults to 25 MiB)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading server configuration from environment variables");

        let host = env_var_any(&["APP_HOST"]).unwrap_or_else(|| {
            debug!("APP_HOST not set, using default: 0.0.0.0");
            "0.0.0.0".to_string()
        });

        let port = match env_var_any(&["APP_PORT", "PORT"]) {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                error!("Invalid port value: {}", raw);
                ConfigError::ParseError(format!("Invalid port value: {}", raw))
            })?,
            None => {
                warn!("APP_PORT/PORT not set, using default: 8000");
                8000
            }
        };

        let max_body_bytes = match env_var_any(&["APP_MAX_BODY_BYTES"]) {
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                error!("Invalid APP_MAX_BODY_BYTES value: {}", raw);
                ConfigError::InvalidValue("Invalid APP_MAX_BODY_BYTES value".to_string())
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };
        debug!("Max request body: {} bytes", max_body_bytes);

        let config = AppConfig { host, port, max_body_bytes };
        config.validate()?;
        info!("Server configuration loaded: {}:{}", config.host, config.port);
        Ok(config)
    }

    /// Create AppConfig for testing
    pub fn from_test_env() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::ValidationError("APP_HOST cannot be empty".to_string()));
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "APP_MAX_BODY_BYTES must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
